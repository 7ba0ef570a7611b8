//! Tasks related to building and testing mogwai-placeholder.
//!
//! Run `cargo xtask help` for more info.
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

const DEMO: &str = "crates/placeholder-demo";
const LIBRARY: &str = "crates/mogwai-placeholder";

fn workspace_dir() -> anyhow::Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .ancestors()
        .nth(2)
        .context("xtask is not inside the workspace")?
        .to_path_buf();
    log::debug!("root: '{}'", root.display());
    anyhow::ensure!(root.join("Cargo.toml").exists(), "root has no Cargo.toml");
    Ok(root)
}

fn build_demo(release: bool, out_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let root = workspace_dir()?;
    let demo_dir = root.join(DEMO);
    let out_dir = out_dir.unwrap_or_else(|| root.join("target").join("demo"));

    log::info!("building the demo from {}", demo_dir.display());
    let profile = if release { "--release" } else { "--debug" };
    duct::cmd!("wasm-pack", "build", profile, "--target", "web", &demo_dir)
        .run()
        .context("could not build the demo")?;

    if out_dir.exists() {
        log::warn!(
            "destination {} already exists - removing it first",
            out_dir.display()
        );
        std::fs::remove_dir_all(&out_dir).context("could not remove stale destination")?;
    }
    std::fs::create_dir_all(&out_dir).context("could not create demo destination")?;
    duct::cmd!("cp", "-R", "index.html", "pkg", &out_dir)
        .dir(&demo_dir)
        .run()
        .context("could not copy files into place")?;

    log::info!("demo is in {}", out_dir.display());
    Ok(())
}

fn have_program(bin: &str) -> bool {
    let have_it = duct::cmd!("which", bin)
        .stdout_null()
        .run()
        .is_ok();
    if have_it {
        log::debug!("have {}", bin);
    } else {
        log::error!("missing {}", bin);
    }
    have_it
}

fn install_deps() -> anyhow::Result<()> {
    for dep in ["wasm-pack"] {
        if !have_program(dep) {
            log::info!("installing {}", dep);
            duct::cmd!("cargo", "install", "--locked", dep)
                .run()
                .context(format!("could not install {}", dep))?;
        }
    }
    Ok(())
}

#[derive(Parser)]
#[clap(author, version, about, subcommand_required = true)]
struct Cli {
    /// Skip installing dependencies
    #[clap(long)]
    skip_install_deps: bool,

    /// The task to run
    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Default)]
struct TestEverything {
    #[clap(long)]
    skip_cargo_test: bool,
    #[clap(long)]
    skip_cargo_doc: bool,
    #[clap(long)]
    skip_wasm_pack_test: bool,
}

#[derive(Subcommand)]
enum Test {
    Everything(TestEverything),
    Cargo,
    CargoDoc,
    Wasm {
        /// Browser to run the headless tests in
        #[clap(long, default_value = "firefox")]
        browser: String,
    },
}

impl Test {
    fn test_cargo(root: &Path) -> anyhow::Result<()> {
        log::info!("running cargo tests");
        duct::cmd!("cargo", "test", "--workspace").dir(root).run()?;
        Ok(())
    }

    fn test_cargo_doc(root: &Path) -> anyhow::Result<()> {
        log::info!("running cargo doc");
        duct::cmd!("cargo", "doc", "--no-deps").dir(root).run()?;
        Ok(())
    }

    fn test_wasm(root: &Path, browser: &str) -> anyhow::Result<()> {
        log::info!("testing mogwai-placeholder in {browser}");
        duct::cmd!(
            "wasm-pack",
            "test",
            format!("--{browser}"),
            "--headless",
            root.join(LIBRARY)
        )
        .run()?;
        Ok(())
    }

    fn run(self) -> anyhow::Result<()> {
        let root = workspace_dir()?;
        match self {
            Test::Everything(TestEverything {
                skip_cargo_test,
                skip_cargo_doc,
                skip_wasm_pack_test,
            }) => {
                if !skip_cargo_test {
                    Self::test_cargo(&root)?;
                }
                if !skip_cargo_doc {
                    Self::test_cargo_doc(&root)?;
                }
                if !skip_wasm_pack_test {
                    Self::test_wasm(&root, "firefox")?;
                }
                Ok(())
            }
            Test::Cargo => Self::test_cargo(&root),
            Test::CargoDoc => Self::test_cargo_doc(&root),
            Test::Wasm { browser } => Self::test_wasm(&root, &browser),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Build the browser demo with wasm-pack
    BuildDemo {
        /// Build with optimizations
        #[clap(long)]
        release: bool,
        /// Where to put the built demo, defaults to target/demo
        #[clap(long)]
        out_dir: Option<PathBuf>,
    },
    /// Run the tests
    #[clap(subcommand)]
    Test(Test),
}

fn main() -> anyhow::Result<()> {
    env_logger::builder().init();

    let cli = Cli::parse();

    if !cli.skip_install_deps {
        install_deps()?;
    }

    match cli.command {
        Command::BuildDemo { release, out_dir } => build_demo(release, out_dir),
        Command::Test(test) => test.run(),
    }
}
