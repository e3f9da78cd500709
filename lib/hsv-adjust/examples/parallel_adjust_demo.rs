use hsv_adjust::{AdjustJob, HsvChannel, adjust_in_parallel};
use image::{ImageReader, RgbaImage};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/test.png")?.decode()?.to_rgba8();
    let (width, height) = img.dimensions();
    let raw = img.into_raw();

    let results = adjust_in_parallel(vec![
        AdjustJob::new(HsvChannel::Saturation, raw.clone(), 50.0, 90.0),
        AdjustJob::new(HsvChannel::Value, raw, 50.0, 30.0),
    ])?;

    for (name, buffer) in ["saturated", "darkened"].into_iter().zip(results) {
        let out = RgbaImage::from_raw(width, height, buffer)
            .ok_or_else(|| anyhow::anyhow!("buffer size mismatch for {name}"))?;
        out.save(output_dir.join(format!("{name}.png")))?;
        println!("✓ Generated {name}.png");
    }

    Ok(())
}
