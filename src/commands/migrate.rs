//! Legacy filter migration

use super::{Context, Outcome};
use crate::Result;

/// Copy legacy filters into the global store when it is still empty
///
/// The host also runs this once at startup. Running it again is a no-op.
///
/// # Errors
///
/// Currently infallible; returns `Result` like the other commands.
pub fn migrate(ctx: &Context<'_>) -> Result<Outcome> {
    let count = ctx.registry.migrate_legacy();
    if count == 0 {
        ctx.output.info("Nothing to migrate");
        return Ok(Outcome::NoChanges);
    }
    ctx.output.success(&format!(
        "Migrated {} legacy filter{}",
        count,
        if count == 1 { "" } else { "s" }
    ));
    Ok(Outcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::global::LEGACY_FILTERS_KEY;
    use crate::settings::MemorySettings;
    use crate::testing::TestWorkspace;
    use crate::ui::mock::MockInput;

    #[test]
    fn test_migrate_once() {
        let ws = TestWorkspace::with_settings(MemorySettings::with_values([(
            LEGACY_FILTERS_KEY.to_string(),
            serde_json::json!([
                { "name": "A", "include": "a/**", "exclude": "" },
                { "name": "B", "include": "b/**", "exclude": "", "enabled": false }
            ]),
        )]));
        let input = MockInput::new(vec![]);
        let ctx = ws.context(&input);

        assert_eq!(migrate(&ctx).unwrap(), Outcome::Applied);
        assert_eq!(migrate(&ctx).unwrap(), Outcome::NoChanges);

        let migrated = ws.registry.load_all();
        assert_eq!(migrated.len(), 2);
        assert_eq!(migrated[1].enabled, Some(false));
        assert!(ws.settings.raw(LEGACY_FILTERS_KEY).is_some());
    }
}
