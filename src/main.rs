use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use parcelsplit_rs::config::AppConfig;
use parcelsplit_rs::layout::Axis;
use parcelsplit_rs::lookup;
use parcelsplit_rs::render::{self, svg};
use parcelsplit_rs::site::{Parcel, Site};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional TOML configuration
    #[arg(short, long, value_name = "FILE", default_value = "parcelsplit.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the estimated floor area of every parcel
    Area {
        #[arg(value_name = "SITE")]
        site: PathBuf,
    },
    /// Subdivide parcels among their tenants and write SVG previews
    Preview {
        #[arg(value_name = "SITE")]
        site: PathBuf,
        /// Only this parcel (by name)
        #[arg(short, long)]
        parcel: Option<String>,
        /// Override every parcel's split axis
        #[arg(short, long)]
        axis: Option<Axis>,
        /// Directory for the SVG files
        #[arg(short, long, value_name = "DIR", default_value = "previews")]
        out: PathBuf,
    },
    /// Reverse-geocode parcels and suggest businesses for them
    Lookup {
        #[arg(value_name = "SITE")]
        site: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("parcelsplit_rs=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Area { site } => {
            let site = Site::from_file(&site, config.preview.default_axis)?;
            let mut total = 0.0;
            for parcel in site.parcels() {
                let area = parcel.area_sq_ft();
                total += area;
                println!("{:<6} {:<28} {:>16}", parcel.id, parcel.name, render::format_area(area));
            }
            println!("{:<35} {:>16}", "Total", render::format_area(total));
        }
        Commands::Preview {
            site,
            parcel,
            axis,
            out,
        } => {
            let mut site = Site::from_file(&site, config.preview.default_axis)?;
            if let Some(axis) = axis {
                let ids: Vec<_> = site.parcels().iter().map(|p| p.id).collect();
                for id in ids {
                    if let Some(p) = site.parcel_mut(id) {
                        p.axis = axis;
                    }
                }
            }

            let selected: Vec<&Parcel> = match &parcel {
                Some(name) => vec![site
                    .find_parcel(name)
                    .with_context(|| format!("No parcel named '{}'", name))?],
                None => site.parcels().iter().collect(),
            };

            fs::create_dir_all(&out)
                .with_context(|| format!("Failed to create output directory: {:?}", out))?;
            for parcel in selected {
                write_preview(parcel, &config, &out)?;
            }
        }
        Commands::Lookup { site } => {
            let site = Site::from_file(&site, config.preview.default_axis)?;
            let lookups = lookup::from_config(&config.lookup)?;
            for parcel in site.parcels() {
                let address = match (&parcel.address, parcel.centroid()) {
                    (Some(addr), _) => addr.clone(),
                    (None, Some(at)) => match lookups.geocoder.reverse(at) {
                        Ok(addr) => addr,
                        Err(e) => {
                            tracing::warn!("Reverse geocode failed for '{}': {:#}", parcel.name, e);
                            continue;
                        }
                    },
                    (None, None) => {
                        tracing::warn!("Parcel '{}' has no vertices, skipping", parcel.name);
                        continue;
                    }
                };
                println!("{} {}: {}", parcel.id, parcel.name, address);
                match lookups.businesses.suggest(&address) {
                    Ok(list) if list.is_empty() => println!("    (no suggestions)"),
                    Ok(list) => {
                        for name in list {
                            println!("    • {}", name);
                        }
                    }
                    Err(e) => tracing::warn!("Business lookup failed for '{}': {:#}", address, e),
                }
            }
        }
    }

    Ok(())
}

fn write_preview(parcel: &Parcel, config: &AppConfig, out_dir: &Path) -> Result<()> {
    let preview = parcel.preview(config.preview.viewport_px, config.preview.margin_px);

    println!(
        "{} {} ({}, {} axis)",
        parcel.id,
        parcel.name,
        render::format_area(preview.area_sq_ft),
        parcel.axis.name()
    );
    for band in &preview.bands {
        let name = parcel
            .tenant(band.occupant)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        match band.rect {
            Some(r) => println!(
                "    {:<4} {:<24} {:>6.1}%  at ({:.1}, {:.1}) {:.1}x{:.1}",
                band.occupant,
                name,
                band.ratio * 100.0,
                r.x,
                r.y,
                r.w,
                r.h
            ),
            None => println!("    {:<4} {:<24} {:>6.1}%  (not drawn)", band.occupant, name, 0.0),
        }
    }
    if preview.is_over_allocated() {
        println!(
            "    over-allocated by {}",
            render::format_area(-preview.unallocated_sq_ft())
        );
    }

    let labels = render::tenant_labels(parcel);
    let doc = svg::render_preview(&preview, &labels);
    let path = out_dir.join(format!("{}.svg", file_stem(parcel)));
    fs::write(&path, doc).with_context(|| format!("Failed to write preview: {:?}", path))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Filesystem-safe name for a parcel's preview file.
fn file_stem(parcel: &Parcel) -> String {
    let slug: String = parcel
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("parcel-{}", parcel.id.0)
    } else {
        format!("{}-{}", parcel.id.0, slug)
    }
}
