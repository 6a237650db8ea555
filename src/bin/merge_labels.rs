use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process;

use clipset::merge::merge_label_files;

/// Merge multiple per-recording label files into one file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the per-recording label files
    input_path: PathBuf,

    /// Directory where the merged label file will be created
    #[arg(long = "output_path", visible_alias = "o", default_value = ".")]
    output_path: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input_path.is_dir() {
        error!(
            "The specified input_path does not exist: {}",
            args.input_path.display()
        );
        process::exit(1);
    }

    match merge_label_files(&args.input_path, &args.output_path) {
        Ok(output_path) => println!("Finished labelling dataset: {}", output_path.display()),
        Err(e) => {
            error!("Failed to merge label files: {}", e);
            process::exit(1);
        }
    }
}
