use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crxkit::download::{ChromeDownloader, Downloader, FirefoxDownloader};
use crxkit::input::{self, InputType};
use crxkit::models::{Extension, ExtensionSource, Manifest};
use crxkit::output::{print_package_summary, ContainerSummary};
use crxkit::{crx, unpack};

#[derive(Parser, Debug)]
#[command(name = "crxkit")]
#[command(about = "Read, fetch, pack and verify Chrome and Firefox extension packages")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack a directory into a signed CRX3 file
    Pack {
        /// Directory with the extension sources (manifest.json at the root)
        source_dir: PathBuf,

        /// Where to write the .crx file
        #[arg(short, long)]
        output: PathBuf,

        /// PKCS#8 PEM signing key; generated there if the file does not
        /// exist, ephemeral if omitted
        #[arg(short, long)]
        key: Option<PathBuf>,
    },

    /// Verify the signature of a CRX3 file
    Verify { file: PathBuf },

    /// Print the extension ID of a CRX3 file
    Id { file: PathBuf },

    /// Show a package summary (identity, container layout, signature)
    Info { file: PathBuf },

    /// Extract a CRX/XPI/ZIP package into a directory
    Extract {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Download an extension from its vendor store
    Download {
        /// Extension ID, store URL, or add-on slug
        input: String,

        /// Treat the input as a Firefox add-on slug
        #[arg(long)]
        firefox: bool,

        /// Output file (defaults to <id>.crx or <slug>.xpi)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Pack {
            source_dir,
            output,
            key,
        } => {
            let path = crx::pack(&source_dir, &output, key.as_deref())?;
            let id = crx::get_extension_id(&path)?;
            println!("Packed {} ({})", path.display(), id);
        }

        Command::Verify { file } => {
            if crx::verify(&file)? {
                println!("{}: signature OK", file.display());
            } else {
                anyhow::bail!("{}: signature verification failed", file.display());
            }
        }

        Command::Id { file } => {
            println!("{}", crx::get_extension_id(&file)?);
        }

        Command::Info { file } => {
            info(&file)?;
        }

        Command::Extract { input, output } => {
            unpack::extract_file(&input, &output)?;
            println!("Extracted to {}", output.display());
        }

        Command::Download {
            input,
            firefox,
            output,
        } => {
            download(&input, firefox, output.as_deref()).await?;
        }
    }

    Ok(())
}

fn info(file: &Path) -> Result<()> {
    let total = fs::metadata(file)?.len();
    let offset = crx::locate_zip_offset(file)?;

    let manifest = read_manifest(file);

    let (id, summary) = if offset == 0 {
        let summary = ContainerSummary {
            format: "ZIP",
            payload_offset: 0,
            payload_size: total,
            proof_count: 0,
            signature_valid: None,
        };
        ("(unsigned archive)".to_string(), summary)
    } else {
        let mut handle = fs::File::open(file)?;
        let container = crx::read_container(&mut handle)?;
        let signature_valid = crx::verify(file)?;
        let summary = ContainerSummary {
            format: "CRX3",
            payload_offset: container.payload_offset,
            payload_size: total.saturating_sub(container.payload_offset),
            proof_count: container.header.proofs.len(),
            signature_valid: Some(signature_valid),
        };
        (crx::get_extension_id(file)?, summary)
    };

    let mut extension = Extension::new(id, ExtensionSource::LocalFile);
    if let Some(manifest) = manifest {
        extension = extension.with_manifest(manifest);
    }

    print_package_summary(&extension, Some(&summary));
    Ok(())
}

fn read_manifest(file: &Path) -> Option<Manifest> {
    let mut archive = unpack::open_archive(file).ok()?;
    let raw = unpack::read_entry(&mut archive, "manifest.json").ok()?;
    let json = String::from_utf8(raw).ok()?;
    Manifest::parse(&json).ok()
}

async fn download(input: &str, firefox: bool, output: Option<&Path>) -> Result<()> {
    let detected = if firefox {
        InputType::FirefoxSlug(input.to_string())
    } else {
        input::detect_input(input)
    };

    let (data, default_name) = match detected {
        InputType::ChromeId(id) => {
            let data = ChromeDownloader::new().download(&id).await?;
            (data, format!("{id}.crx"))
        }
        InputType::ChromeUrl(url) => {
            let id = input::extract_chrome_id_from_url(&url)
                .context("No extension ID found in the store URL")?;
            let data = ChromeDownloader::new().download(&id).await?;
            (data, format!("{id}.crx"))
        }
        InputType::FirefoxUrl(url) => {
            let slug = input::extract_firefox_slug_from_url(&url)
                .context("No add-on slug found in the store URL")?;
            let data = FirefoxDownloader::new().download(&slug).await?;
            (data, format!("{slug}.xpi"))
        }
        InputType::FirefoxSlug(slug) => {
            let data = FirefoxDownloader::new().download(&slug).await?;
            (data, format!("{slug}.xpi"))
        }
        InputType::LocalFile(path) => {
            anyhow::bail!("{path} is a local file, nothing to download")
        }
    };

    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_name));
    fs::write(&target, &data)?;
    println!("Downloaded {} bytes to {}", data.len(), target.display());
    Ok(())
}
