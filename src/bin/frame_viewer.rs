use clap::Parser;
use log::error;
use opencv::{highgui, imgproc, prelude::*, videoio};
use std::process;

/// Step through a video one frame at a time. Any key advances, 'q' quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the video to inspect
    video_path: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("Failed to play {}: {}", args.video_path, e);
        process::exit(1);
    }
}

fn run(args: &Args) -> opencv::Result<()> {
    let mut cap = videoio::VideoCapture::from_file(&args.video_path, videoio::CAP_ANY)?;
    println!(
        "Frame count: {}",
        cap.get(videoio::CAP_PROP_FRAME_COUNT)?
    );
    println!("FPS: {}", cap.get(videoio::CAP_PROP_FPS)?);

    let mut frame = Mat::default();
    while cap.read(&mut frame)? && !frame.empty() {
        let mut gray = Mat::default();
        imgproc::cvt_color(&frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;

        highgui::imshow("frame", &gray)?;
        let key = highgui::wait_key(0)?;
        if key == i32::from(b'q') {
            break;
        }
    }

    cap.release()?;
    highgui::destroy_all_windows()?;
    Ok(())
}
