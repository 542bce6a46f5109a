//! Command line arguments of the irradiance baker.
//!
//! Uses clap for CLI parsing with:
//! - Help text (`--help`)
//! - Validation and clear error messages
//! - Output path derived from the input path unless given explicitly

use std::path::{Path, PathBuf};

use irradiance_core::{IrradianceConfig, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH};

/// Appended to the input path (minus its extension) to name the output.
pub const OUTPUT_SUFFIX: &str = "-irradiance.hdr";

/// Derive the output path from the input path.
///
/// Drops the last 4 characters (the expected `.hdr`) and appends
/// [`OUTPUT_SUFFIX`]. Paths shorter than 4 characters are kept whole.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let name = input.to_string_lossy();
    let len = name.chars().count();
    let stem: String = if len < 4 {
        name.into_owned()
    } else {
        name.chars().take(len - 4).collect()
    };
    PathBuf::from(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Resolved arguments of one bake.
///
/// # Examples
///
/// ```bash
/// # Bake loft.hdr into loft-irradiance.hdr at 200x100
/// irradiance loft.hdr
///
/// # Smaller map, explicit output, four workers
/// irradiance loft.hdr --width 64 --height 32 --threads 4 -o ibl/loft_diffuse.hdr
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    width: u32,
    height: u32,
    threads: Option<usize>,
}

impl BakeArgs {
    /// Arguments for baking `input` with default settings.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
            threads: None,
        }
    }

    /// Set an explicit output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the output resolution.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Parse the process command line, exiting with usage help on error.
    pub fn parse() -> Self {
        use clap::Parser;
        native::ClapArgs::parse().into()
    }

    /// Parse an explicit argument list (the first item is the program name).
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::Parser;
        native::ClapArgs::try_parse_from(args).map(Into::into)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Explicit output path, or the one derived from the input.
    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input))
    }

    /// Integrator settings for this bake.
    pub fn config(&self) -> IrradianceConfig {
        IrradianceConfig {
            width: self.width,
            height: self.height,
            threads: self.threads,
        }
    }
}

mod native {
    use super::*;
    use clap::Parser;

    /// Irradiance baker arguments.
    #[derive(Parser, Debug)]
    #[command(
        name = "irradiance",
        about = "Bake a diffuse irradiance map from an HDR environment map",
        long_about = "Precomputes a diffuse irradiance map from an equirectangular Radiance HDR \
            environment map by brute-force integration over the hemisphere of every output \
            pixel.\n\n\
            The output is written next to the input as <name>-irradiance.hdr unless \
            --output is given.\n\n\
            Set RUST_LOG=debug for more detailed progress output.",
        version
    )]
    pub(super) struct ClapArgs {
        /// Input HDR environment map (equirectangular, Radiance .hdr).
        pub input: PathBuf,

        /// Output path. Defaults to the input path with `.hdr` replaced by `-irradiance.hdr`.
        #[arg(short, long)]
        pub output: Option<PathBuf>,

        /// Output map width in pixels.
        #[arg(long, default_value_t = DEFAULT_OUTPUT_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
        pub width: u32,

        /// Output map height in pixels.
        #[arg(long, default_value_t = DEFAULT_OUTPUT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
        pub height: u32,

        /// Number of worker threads (default: one per core).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pub threads: Option<u32>,
    }

    impl From<ClapArgs> for BakeArgs {
        fn from(args: ClapArgs) -> Self {
            if !has_hdr_extension(&args.input) && args.output.is_none() {
                log::warn!(
                    "Input {} does not end in .hdr; the last 4 characters are still \
                    replaced when naming the output. Use --output to choose a name.",
                    args.input.display()
                );
            }

            Self {
                input: args.input,
                output: args.output,
                width: args.width,
                height: args.height,
                threads: args.threads.map(|threads| threads as usize),
            }
        }
    }

    fn has_hdr_extension(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("hdr"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_replaces_hdr_extension() {
        assert_eq!(
            derive_output_path(Path::new("envs/newport_loft.hdr")),
            PathBuf::from("envs/newport_loft-irradiance.hdr")
        );
    }

    #[test]
    fn output_strips_four_characters_whatever_they_are() {
        assert_eq!(
            derive_output_path(Path::new("sky.rgbe")),
            PathBuf::from("sky.-irradiance.hdr")
        );
    }

    #[test]
    fn short_input_is_kept_whole() {
        assert_eq!(
            derive_output_path(Path::new("sky")),
            PathBuf::from("sky-irradiance.hdr")
        );
    }

    #[test]
    fn defaults_match_core_defaults() {
        let args = BakeArgs::new("loft.hdr");
        assert_eq!(args.config(), IrradianceConfig::default());
        assert_eq!(args.output(), PathBuf::from("loft-irradiance.hdr"));
    }

    #[test]
    fn builder_overrides() {
        let args = BakeArgs::new("loft.hdr")
            .with_output("out.hdr")
            .with_size(64, 32)
            .with_threads(3);
        assert_eq!(args.output(), PathBuf::from("out.hdr"));
        assert_eq!(args.config(), IrradianceConfig::default().with_size(64, 32).with_threads(3));
    }

    #[test]
    fn parse_positional_input_only() {
        let args = BakeArgs::try_parse_from(["irradiance", "loft.hdr"]).unwrap();
        assert_eq!(args, BakeArgs::new("loft.hdr"));
    }

    #[test]
    fn parse_all_options() {
        let args = BakeArgs::try_parse_from([
            "irradiance",
            "loft.hdr",
            "--output",
            "diffuse.hdr",
            "--width",
            "32",
            "--height",
            "16",
            "--threads",
            "2",
        ])
        .unwrap();
        assert_eq!(
            args,
            BakeArgs::new("loft.hdr")
                .with_output("diffuse.hdr")
                .with_size(32, 16)
                .with_threads(2)
        );
    }

    #[test]
    fn parse_rejects_missing_input() {
        assert!(BakeArgs::try_parse_from(["irradiance"]).is_err());
    }

    #[test]
    fn parse_rejects_zero_sizes_and_threads() {
        for flag in ["--width", "--height", "--threads"] {
            let result = BakeArgs::try_parse_from(["irradiance", "loft.hdr", flag, "0"]);
            assert!(result.is_err(), "{flag} 0 was accepted");
        }
    }
}
