//! aim-decoder CLI
//!
//! Inspect model files and decode compressed textures from the command line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use aim_decoder::{classify, decode_texture, derive_normal_map, load_model};

#[derive(Parser)]
#[command(name = "aim-decoder")]
#[command(author, version, about = "Decode .model geometry and .TM textures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the submesh records of a model file
    Info {
        /// Path to the .model file
        #[arg(short, long)]
        model: PathBuf,

        /// Dump the full model as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Decode a compressed texture to PNG
    Texture {
        /// Path to the .TM file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Derive a tangent-space normal map from a compressed texture
    NormalMap {
        /// Path to the .TM file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Bump strength (clamped to 0.0..=1.0)
        #[arg(short, long, default_value = "0.5")]
        strength: f32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { model, json } => show_model_info(&model, json)?,
        Commands::Texture { input, output } => decode_to_png(&input, &output)?,
        Commands::NormalMap {
            input,
            output,
            strength,
        } => derive_to_png(&input, &output, strength)?,
    }

    Ok(())
}

fn show_model_info(path: &PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let model = load_model(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    println!("Model: {}", model.name);
    println!("  Submeshes: {}", model.submeshes.len());

    for submesh in &model.submeshes {
        let classification = classify(&submesh.name);
        println!(
            "  - {:?} \"{}\" material={:?} visual={} lod={}",
            submesh.kind,
            submesh.name,
            submesh.material.material_type,
            classification.is_visual,
            classification.lod_index,
        );
        if !submesh.texture_refs.albedo.is_empty() {
            println!("      albedo: {}", submesh.texture_refs.albedo);
        }
        if !submesh.texture_refs.specular.is_empty() {
            println!("      specular: {}", submesh.texture_refs.specular);
        }
        match &submesh.geometry {
            Some(geometry) => println!(
                "      {} vertices, {} triangles",
                geometry.vertex_count(),
                geometry.triangle_count()
            ),
            None => println!("      no geometry"),
        }
    }

    Ok(())
}

fn decode_to_png(input: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    let texture = decode_texture(&bytes)?;

    println!(
        "Decoded {}x{} texture (alpha: {})",
        texture.width, texture.height, texture.has_alpha
    );

    texture.save_png(output)?;
    println!("Wrote {:?}", output);

    Ok(())
}

fn derive_to_png(
    input: &PathBuf,
    output: &PathBuf,
    strength: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    let texture = decode_texture(&bytes)?;
    let normal = derive_normal_map(&texture, strength);

    image::save_buffer(
        output,
        &normal,
        texture.width,
        texture.height,
        image::ExtendedColorType::Rgba8,
    )?;
    println!(
        "Wrote {}x{} normal map to {:?}",
        texture.width, texture.height, output
    );

    Ok(())
}
