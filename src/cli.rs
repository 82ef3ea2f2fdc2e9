//! CLI: infer → (go | java | typescript | schema)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::inference::Nesting;
use crate::{GenerateOptions, Target, naming};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate typed configuration declarations from a sample JSON document
#[derive(Parser, Debug)]
#[command(name = "configd", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit Go structs with `json` tags
    Go(GoOut),
    /// emit Java classes with getters and setters
    Java(ClassOut),
    /// emit TypeScript classes with getters and setters
    #[command(name = "typescript")]
    TypeScript(ClassOut),
    /// infer and print the schema tree and registry as JSON
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON document to read, or '-' for stdin
    #[arg(long, short, default_value = "-")]
    input: String,

    /// JSON Pointer selecting the sub-document to model (e.g. /Config)
    #[arg(long)]
    json_pointer: Option<String>,

    /// name of the root declaration
    #[arg(long, default_value = "Config")]
    root_type: String,

    /// keep string leaves as strings (no timestamp/IP/number detection)
    #[arg(long, default_value_t = false)]
    no_convert: bool,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output file (stdout if omitted)
    #[arg(short, long, conflicts_with = "project")]
    out: Option<PathBuf>,

    /// project root; writes to the target's conventional location inside it
    #[arg(long)]
    project: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GoOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output: OutputSettings,

    /// omit the trailing `// <value>` comments
    #[arg(long)]
    no_examples: bool,

    /// skip the formatting pass
    #[arg(long)]
    no_format: bool,

    /// package clause of the generated file
    #[arg(long, default_value = "configd")]
    package: String,
}

#[derive(clap::Parser, Debug)]
struct ClassOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// how plain nested objects are modelled
    #[arg(long, value_enum, default_value_t = NestingArg::Inline)]
    nesting: NestingArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum NestingArg {
    /// anonymous inline structures (Go)
    Inline,
    /// registered named declarations (Java, TypeScript)
    Named,
}

impl From<NestingArg> for Nesting {
    fn from(arg: NestingArg) -> Self {
        match arg {
            NestingArg::Inline => Nesting::Inline,
            NestingArg::Named => Nesting::Named,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn read(&self) -> Result<Vec<u8>> {
        if self.input == "-" {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read JSON from stdin")?;
            return Ok(buf);
        }
        std::fs::read(&self.input).with_context(|| format!("failed to read input file {}", self.input))
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            root_name: Some(self.root_type.clone()),
            json_pointer: self.json_pointer.clone(),
            refine_strings: !self.no_convert,
            ..GenerateOptions::default()
        }
    }

    fn root_name(&self) -> String {
        naming::root_name(Some(&self.root_type))
    }
}

impl OutputSettings {
    fn destination(&self, target: Target, root_name: &str) -> Option<PathBuf> {
        match (&self.out, &self.project) {
            (Some(out), _) => Some(out.clone()),
            (None, Some(project)) => Some(project.join(target.default_destination(root_name))),
            (None, None) => None,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Go(target) => {
                let options = GenerateOptions {
                    with_examples: !target.no_examples,
                    format: !target.no_format,
                    go_package: Some(target.package.clone()),
                    ..target.input_settings.options()
                };
                generate_to(Target::Go, &target.input_settings, &target.output, &options)
            }
            Command::Java(target) => generate_to(
                Target::Java,
                &target.input_settings,
                &target.output,
                &target.input_settings.options(),
            ),
            Command::TypeScript(target) => generate_to(
                Target::TypeScript,
                &target.input_settings,
                &target.output,
                &target.input_settings.options(),
            ),
            Command::Schema(target) => {
                let bytes = target.input_settings.read()?;
                let view = crate::infer_schema(&bytes, target.nesting.into(), &target.input_settings.options())
                    .context("schema inference failed")?;
                let src = serde_json::to_string_pretty(&view).context("failed to serialize schema")?;
                write_output(target.out.as_deref(), &src)
            }
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second install (tests) is not an error worth reporting
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn generate_to(
    target: Target,
    input: &InputSettings,
    output: &OutputSettings,
    options: &GenerateOptions,
) -> Result<()> {
    let bytes = input.read()?;
    let source = crate::generate(&bytes, target, options)
        .with_context(|| format!("failed to generate {target:?} declarations from {}", input.input))?;
    let destination = output.destination(target, &input.root_name());
    write_output(destination.as_deref(), &source)
}

fn write_output(destination: Option<&Path>, text: &str) -> Result<()> {
    let Some(path) = destination else {
        print!("{text}");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote generated source");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::try_parse_from(std::iter::once("configd").chain(args.iter().copied())).unwrap()
    }

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("config.json");
        std::fs::write(&path, br#"{"Config": {"id": 1, "name": "svc", "started": "2023-05-01T00:00:00Z"}}"#)
            .unwrap();
        path
    }

    #[test]
    fn defaults() {
        let cli = parse(&["go"]);
        let Command::Go(go) = &cli.cmd else { panic!("expected go") };
        assert_eq!(go.input_settings.input, "-");
        assert_eq!(go.input_settings.root_type, "Config");
        assert_eq!(go.package, "configd");
        assert!(!go.no_examples && !go.no_format && !go.input_settings.no_convert);
        assert!(go.output.out.is_none() && go.output.project.is_none());
    }

    #[test]
    fn out_and_project_conflict() {
        let res = CommandLineInterface::try_parse_from(["configd", "java", "--out", "a", "--project", "b"]);
        assert!(res.is_err());
    }

    #[test]
    fn typescript_subcommand_name() {
        let cli = parse(&["typescript", "-i", "x.json", "--no-convert"]);
        let Command::TypeScript(ts) = &cli.cmd else { panic!("expected typescript") };
        assert!(ts.input_settings.no_convert);
        assert!(!ts.input_settings.options().refine_strings);
    }

    #[test]
    fn project_destinations() {
        let output = OutputSettings { out: None, project: Some(PathBuf::from("proj")) };
        assert_eq!(
            output.destination(Target::Go, "Config"),
            Some(PathBuf::from("proj/vendor/configd/structs.go"))
        );
        assert_eq!(
            output.destination(Target::Java, "AppSettings"),
            Some(PathBuf::from("proj/app/settings/AppSettings.java"))
        );
        assert_eq!(output.destination(Target::TypeScript, "Config"), Some(PathBuf::from("proj/configd/c.ts")));
    }

    #[test]
    fn go_into_project_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let project = dir.path().join("proj");
        let cli = parse(&[
            "go",
            "-i",
            input.to_str().unwrap(),
            "--json-pointer",
            "/Config",
            "--project",
            project.to_str().unwrap(),
        ]);
        cli.run().unwrap();
        let src = std::fs::read_to_string(project.join("vendor/configd/structs.go")).unwrap();
        assert!(src.starts_with("// Code generated by configd. DO NOT EDIT.\n\npackage configd\n"), "{src}");
        assert!(src.contains("time.Time"), "{src}");
    }

    #[test]
    fn java_to_explicit_file_uses_root_type() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let out = dir.path().join("nested/out/Settings.java");
        let cli = parse(&[
            "java",
            "-i",
            input.to_str().unwrap(),
            "--json-pointer",
            "/Config",
            "--root-type",
            "settings",
            "-o",
            out.to_str().unwrap(),
        ]);
        cli.run().unwrap();
        let src = std::fs::read_to_string(out).unwrap();
        assert!(src.contains("public class Settings {"), "{src}");
    }

    #[test]
    fn schema_dump_is_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let out = dir.path().join("schema.json");
        let cli = parse(&[
            "schema",
            "-i",
            input.to_str().unwrap(),
            "--json-pointer",
            "/Config",
            "--nesting",
            "named",
            "-o",
            out.to_str().unwrap(),
        ]);
        cli.run().unwrap();
        let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(v["root_name"], "Config");
        assert_eq!(v["root"]["fields"][0]["key"], "id");
    }

    #[test]
    fn missing_input_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let cli = parse(&["go", "-i", missing.to_str().unwrap()]);
        let err = cli.run().unwrap_err();
        assert!(err.to_string().contains("failed to read input file"), "{err}");
    }

    #[test]
    fn bad_pointer_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let cli = parse(&["typescript", "-i", input.to_str().unwrap(), "--json-pointer", "/Missing"]);
        let err = cli.run().unwrap_err();
        assert!(format!("{err:#}").contains("/Missing"), "{err:#}");
    }
}
