use std::path::PathBuf;

use bsp_dungeon::{DungeonGenerator, GenerationSettings};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Text map, one glyph per tile
    Ascii,
    /// Serialized dungeon data
    Json,
}

#[derive(Parser)]
#[command(name = "bsp-dungeon")]
#[command(about = "Generate a BSP dungeon layout")]
struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// 0 draws a random seed
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    max_depth: Option<u32>,

    #[arg(long)]
    min_room_size: Option<i32>,

    #[arg(long)]
    corridor_width: Option<i32>,

    #[arg(short, long, value_enum, default_value = "ascii")]
    format: OutputFormat,
}

impl Cli {
    fn settings(&self) -> Result<GenerationSettings, bsp_dungeon::DungeonError> {
        let mut settings = match &self.settings {
            Some(path) => GenerationSettings::load(path)?,
            None => GenerationSettings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        if let Some(min_room_size) = self.min_room_size {
            settings.min_room_size = min_room_size;
        }
        if let Some(corridor_width) = self.corridor_width {
            settings.corridor_width = corridor_width;
        }
        Ok(settings)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let generator = DungeonGenerator::new(cli.settings()?)?;
    let dungeon = generator.generate_from_settings();

    match cli.format {
        OutputFormat::Ascii => {
            print!("{}", dungeon);
            println!(
                "seed {} | {} rooms | {} corridors",
                dungeon.seed(),
                dungeon.rooms().len(),
                dungeon.corridors().len()
            );
        }
        OutputFormat::Json => println!("{}", dungeon.to_data().to_json()?),
    }
    Ok(())
}
