use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "aimrelay=info,aimrelay_llm_api=info,aimrelay_search=info,tower_http=info";
const VERBOSE_FILTER: &str = "aimrelay=debug,aimrelay_llm_api=debug,aimrelay_search=debug,tower_http=debug";

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over both built-in filters.
pub fn init(verbose: bool, json: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // A second init from tests is harmless
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
