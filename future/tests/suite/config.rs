use std::io::Write;

use rail_future::{Deferred, DeferredConfig, ResolvePolicy};

use crate::common::init_tracing;

#[tokio::test]
async fn policy_loaded_from_file_governs_resolvers() -> anyhow::Result<()> {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "resolve_policy = \"reject\"")?;
    let config = DeferredConfig::load(file.path())?;
    assert_eq!(config.resolve_policy, ResolvePolicy::Reject);

    let mut second = None;
    let deferred = Deferred::make_with(&config, |resolver| {
        let _ = resolver.resolve('a');
        second = Some(resolver.resolve('b'));
    });

    assert!(matches!(second, Some(Err(_))));
    assert_eq!(deferred.await, 'a');
    Ok(())
}

#[test]
fn default_config_ignores_second_resolve() -> anyhow::Result<()> {
    let config = DeferredConfig::from_toml_str("")?;
    let deferred = Deferred::make_with(&config, |resolver| {
        assert!(resolver.resolve(1).is_ok());
        assert!(resolver.resolve(2).is_ok());
    });
    assert!(deferred.is_settled());
    Ok(())
}
