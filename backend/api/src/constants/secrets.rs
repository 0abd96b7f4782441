use std::fs::File;
use std::io::Read;
use std::path::Path;

const DOCKER_SECRETS_PATH: &str = "/run/secrets/";

/// Read a docker secret by name, trimming the trailing newline most secret
/// files are written with.
pub fn read_secret(name: &str) -> Result<String, std::io::Error> {
    let mut secret_val = String::new();
    File::open(Path::new(DOCKER_SECRETS_PATH).join(name.to_lowercase()))?
        .read_to_string(&mut secret_val)?;
    Ok(secret_val.trim_end().to_owned())
}

/// Read a value from the environment variable `name`, falling back to the
/// docker secret named by `{name}_DOCKER_SECRET`. Returns `None` if neither is
/// provided.
pub fn env_or_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().or_else(|| {
        let secret_path = std::env::var(format!("{name}_DOCKER_SECRET")).ok()?;
        match read_secret(&secret_path) {
            Ok(secret) => Some(secret),
            Err(err) => {
                tracing::error!("Failed to read {name} docker secret: {err}");
                None
            }
        }
    })
}
