use std::path::PathBuf;
use std::process::ExitCode;

use irradiance_core::{codec, compute_irradiance_map, IrradianceResult};

use crate::args::BakeArgs;

/// The baking application: load, integrate, save.
pub struct App;

impl App {
    /// Run a bake from the binary entry point.
    ///
    /// Initializes logging, parses the command line, runs [`App::bake`] and
    /// turns the outcome into a process exit status. Failures are logged once
    /// at error level with the path and the underlying cause.
    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        crate::init();

        let args = BakeArgs::parse();
        match Self::bake(&args) {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("Bake of {} failed: {err}", args.input().display());
                ExitCode::FAILURE
            }
        }
    }

    /// Bake the irradiance map described by `args` and return the path it
    /// was written to.
    ///
    /// Nothing is written unless decoding and integration both succeed.
    pub fn bake(args: &BakeArgs) -> IrradianceResult<PathBuf> {
        let output = args.output();
        let config = args.config();

        let env = codec::decode(args.input())?;
        let map = compute_irradiance_map(&env, &config)?;
        codec::encode(&output, &map)?;

        Ok(output)
    }
}
