use crate::models::Extension;
use colored::*;

/// Container-level facts gathered while opening a package.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    pub format: &'static str,
    pub payload_offset: u64,
    pub payload_size: u64,
    pub proof_count: usize,
    pub signature_valid: Option<bool>,
}

pub fn print_package_summary(extension: &Extension, container: Option<&ContainerSummary>) {
    print_header(extension);

    if let Some(container) = container {
        print_container_section(container);
    }
}

fn print_header(extension: &Extension) {
    println!("{}", "┌─────────────────────────────────────────────────────────────┐".bright_black());

    let name = extension.name.as_deref().unwrap_or("Unknown Extension");
    println!("│  Extension: {:<48}│", name.bold());
    println!("│  ID: {:<55}│", extension.id);

    let version = extension.version.as_deref().unwrap_or("?");
    let manifest_v = extension.manifest.as_ref()
        .and_then(|m| m.manifest_version)
        .map(|v| format!("Manifest V{}", v))
        .unwrap_or_else(|| "?".to_string());
    let source = format!("{:?}", extension.source);

    println!("│  Version: {} │ {} │ {:<26}│", version, manifest_v, source);
    println!("{}", "└─────────────────────────────────────────────────────────────┘".bright_black());
    println!();
}

fn print_container_section(container: &ContainerSummary) {
    println!("{}", "── Container ────────────────────────────────────────────────".bright_black());

    println!("  Format:  {}", container.format.cyan());
    println!(
        "  Payload: {} bytes at offset {}",
        container.payload_size,
        container.payload_offset
    );
    println!("  Proofs:  {}", container.proof_count);

    let signature = match container.signature_valid {
        Some(true) => "VALID".green().bold(),
        Some(false) => "INVALID".red().bold(),
        None => "not checked".bright_black(),
    };
    println!("  Signature: {}", signature);

    println!();
}
