//! Worker binary that `pg_embedded_setup_unpriv` spawns for privileged
//! cluster operations when integration tests run as root.
//!
//! Usage: `pg_worker <setup|start|stop> <payload.json>`. The payload is a
//! serialised [`pg_embedded_setup_unpriv::worker::WorkerPayload`].

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use color_eyre::eyre::{Context, Report, Result, bail, eyre};
use pg_embedded_setup_unpriv::worker::WorkerPayload;
use postgresql_embedded::PostgreSQL;
use tokio::runtime::Builder;

fn main() -> Result<()> {
    color_eyre::install()?;
    let invocation = Invocation::from_args(env::args_os())?;
    invocation.run()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Setup,
    Start,
    Stop,
}

impl FromStr for Operation {
    type Err = Report;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(eyre!("unsupported operation '{other}' (expected setup, start or stop)")),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        })
    }
}

#[derive(Debug)]
struct Invocation {
    operation: Operation,
    payload_path: PathBuf,
}

impl Invocation {
    fn from_args(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter().skip(1);
        let (Some(operation), Some(payload_path)) = (args.next(), args.next()) else {
            bail!("usage: pg_worker <setup|start|stop> <payload.json>");
        };
        if let Some(extra) = args.next() {
            bail!("unexpected argument '{}'", extra.to_string_lossy());
        }
        Ok(Self {
            operation: operation.to_string_lossy().parse()?,
            payload_path: PathBuf::from(payload_path),
        })
    }

    fn run(self) -> Result<()> {
        let payload = read_payload(&self.payload_path)?;
        let settings = payload
            .settings
            .into_settings()
            .map_err(|err| Report::new(err).wrap_err("rebuild postgres settings"))?;
        // Runs before the runtime exists, so no other thread reads the env.
        for (key, value) in payload.environment {
            match value {
                Some(value) => unsafe { env::set_var(&key, value.expose()) },
                None => unsafe { env::remove_var(&key) },
            }
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("build worker runtime")?;
        let mut postgres = PostgreSQL::new(settings);
        let operation = self.operation;
        runtime
            .block_on(async move {
                match operation {
                    Operation::Setup => postgres.setup().await,
                    Operation::Start => postgres.start().await,
                    Operation::Stop => postgres.stop().await,
                }
            })
            .with_context(|| format!("postgres {operation} failed"))
    }
}

fn read_payload(path: &Path) -> Result<WorkerPayload> {
    let bytes = fs::read(path).with_context(|| format!("read payload {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse payload {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case(&["pg_worker", "setup", "/tmp/p.json"], Operation::Setup)]
    #[case(&["pg_worker", "stop", "/tmp/p.json"], Operation::Stop)]
    fn parses_operation_and_payload(#[case] raw: &[&str], #[case] expected: Operation) {
        let invocation = Invocation::from_args(args(raw)).expect("valid arguments");

        assert_eq!(invocation.operation, expected);
        assert_eq!(invocation.payload_path, PathBuf::from("/tmp/p.json"));
    }

    #[rstest]
    #[case(&["pg_worker", "setup"], "usage")]
    #[case(&["pg_worker", "restart", "/tmp/p.json"], "unsupported operation")]
    #[case(&["pg_worker", "start", "/tmp/p.json", "extra"], "unexpected argument")]
    fn rejects_malformed_invocations(#[case] raw: &[&str], #[case] message: &str) {
        let error = Invocation::from_args(args(raw)).expect_err("invalid arguments");

        assert!(error.to_string().contains(message), "{error}");
    }
}
