//! CLI command implementations.

use std::path::PathBuf;

use healthz::{parse_path, CallContext, Config, MemoryService, Operation};

/// Connection settings from the command line. Each set field overrides the
/// config file.
#[derive(Debug, Default)]
pub struct ConnectOptions {
    pub config: Option<PathBuf>,
    pub target: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub device_state: Option<PathBuf>,
}

/// Load config and apply command-line overrides.
fn resolve_config(opts: &ConnectOptions) -> healthz::Result<Config> {
    let mut config = Config::load(opts.config.as_deref())?;

    if let Some(target) = &opts.target {
        config.target = target.clone();
    }
    if let Some(username) = &opts.username {
        config.username = Some(username.clone());
    }
    if let Some(password) = &opts.password {
        config.password = Some(password.clone());
    }
    if let Some(timeout) = opts.timeout_secs {
        config.timeout_secs = timeout;
    }
    if let Some(state) = &opts.device_state {
        config.device_state = Some(state.clone());
    }

    Ok(config)
}

/// Open the service and build the call context.
fn connect(opts: &ConnectOptions) -> healthz::Result<(MemoryService, CallContext)> {
    let config = resolve_config(opts)?;

    let state = config.device_state.as_deref().ok_or_else(|| {
        healthz::Error::Config(
            "No device state configured. Use --device-state or set device_state in the config file"
                .to_string(),
        )
    })?;

    let service = MemoryService::load(state)?;
    log::debug!(
        "loaded {} component records from {}",
        service.components().len(),
        state.display()
    );

    Ok((service, CallContext::from_config(&config)))
}

/// Run one operation and print the rendered response.
pub fn run(op: Operation, opts: &ConnectOptions, jsonin: &str) -> healthz::Result<()> {
    let (service, ctx) = connect(opts)?;
    let rendered = healthz::execute(op, &service, &ctx, jsonin)?;
    print!("{}", rendered);
    Ok(())
}

/// Run an operation named by its RPC name.
pub fn rpc(name: &str, opts: &ConnectOptions, jsonin: &str) -> healthz::Result<()> {
    let op: Operation = name.parse()?;
    run(op, opts, jsonin)
}

/// Print the parsed structure of a path expression.
pub fn parse(path_str: &str) -> healthz::Result<()> {
    let path = parse_path(path_str);

    println!("Path: {}", path);
    println!("Elements: {}", path.len());
    for (i, element) in path.elements.iter().enumerate() {
        if element.is_plain() {
            println!("  {}: {}", i, element.name);
        } else {
            let predicates: Vec<String> = element
                .predicates
                .iter()
                .map(|(k, v)| format!("{}={:?}", k, v))
                .collect();
            println!("  {}: {} [{}]", i, element.name, predicates.join(", "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_win() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        let contents = "target = \"a:1\"\nusername = \"file-user\"\ntimeout_secs = 5\n";
        std::fs::write(&config_path, contents).unwrap();

        let opts = ConnectOptions {
            config: Some(config_path),
            target: Some("b:2".to_string()),
            timeout_secs: Some(0),
            ..Default::default()
        };
        let config = resolve_config(&opts).unwrap();
        assert_eq!(config.target, "b:2");
        assert_eq!(config.username.as_deref(), Some("file-user"));
        assert_eq!(config.timeout_secs, 0);
    }

    #[test]
    fn test_connect_requires_device_state() {
        let tmp = TempDir::new().unwrap();
        let opts = ConnectOptions {
            config: Some(tmp.path().join("missing.toml")),
            ..Default::default()
        };
        let err = connect(&opts).unwrap_err();
        assert!(matches!(err, healthz::Error::Config(_)));
    }
}
