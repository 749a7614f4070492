use crate::cli::commands::evaluation_time;
use crate::cli::commands::resource::resource_table;
use crate::cli::parser::MapArgs;
use crate::config::Config;
use crate::core::filter::MarkerFilter;
use crate::db::pool::DbPool;
use crate::db::queries::load_resources;
use crate::errors::AppResult;
use crate::ui::messages::info;

impl From<&MapArgs> for MarkerFilter {
    fn from(args: &MapArgs) -> Self {
        MarkerFilter {
            search: args.search.clone(),
            types: args.types.clone(),
            connectors: args.connectors.clone(),
            available_now: args.available,
            free_only: args.free,
        }
    }
}

pub fn handle(args: &MapArgs, cfg: &Config) -> AppResult<()> {
    let at = evaluation_time(args.at.as_deref())?;
    let pool = DbPool::new(&cfg.database)?;
    let resources = load_resources(&pool.conn)?;

    let filter = MarkerFilter::from(args);
    let markers = filter.apply(&resources, &at);

    if markers.is_empty() {
        info("No resources match the filter.");
        return Ok(());
    }

    print!("{}", resource_table(&markers, &at).render(&cfg.separator_char));
    println!("\n{} of {} resource(s) shown", markers.len(), resources.len());
    Ok(())
}
