use super::emit;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::format::format_config;
use crate::output::{OutputContext, config_table};

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &OutputContext, config: &AnalysisConfig) -> Result<()> {
    emit(
        ctx,
        config,
        |config, ctx| ctx.render(&config_table(config, ctx.theme())),
        format_config,
    )
}
