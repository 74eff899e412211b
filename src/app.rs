use std::path::PathBuf;

use log::{debug, info};

use super::decode::{read_png, DecodedImage};
use super::image::*;
use super::imgproc::{pack, rotate, PackMode, Rotation};
use super::output;

pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rotation: Rotation,
    pub pack_mode: PackMode,

    pub preview: Option<PathBuf>,
    pub dump: bool,
}

/// Pack and orient one decoded image.
pub fn convert_image(
    decoded: &DecodedImage,
    pack_mode: PackMode,
    rotation: Rotation,
) -> crate::Result<PackedBitmap> {
    let t_start = std::time::Instant::now();

    let packed = pack(&decoded.pixels()?, pack_mode)?;
    let t_packed = std::time::Instant::now();

    let rotated = rotate(packed, rotation)?;
    let t_rotated = std::time::Instant::now();

    debug!("Converted {}x{} {:?} into {}x{} {:?}. Cost: pack: {:?}, rotate: {:?}",
           decoded.size().width,
           decoded.size().height,
           decoded.format(),
           rotated.width(),
           rotated.height(),
           rotated.format(),
           t_packed - t_start,
           t_rotated - t_packed);
    Ok(rotated)
}

pub fn run(options: &ConvertOptions) -> anyhow::Result<()> {
    let t_start = std::time::Instant::now();
    let decoded = read_png(&options.input)?;
    let t_decoded = std::time::Instant::now();

    let bitmap = convert_image(&decoded, options.pack_mode, options.rotation)?;
    drop(decoded);

    // nothing is written unless every stage above succeeded
    output::write_bitmap(&options.output, &bitmap)?;
    if let Some(preview) = &options.preview {
        output::save_preview(preview, &bitmap)?;
    }
    if options.dump {
        print!("{}", output::render_text(&bitmap)?);
    }

    info!("Wrote {} ({}x{}, {} bytes per row, rotated {} degrees), decode: {:?}, total: {:?}",
          options.output.display(),
          bitmap.width(),
          bitmap.height(),
          bitmap.pitch(),
          options.rotation.degrees(),
          t_decoded - t_start,
          t_start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(data: &[u8], width: u32, height: u32, color_type: png::ColorType, bit_depth: png::BitDepth) -> Vec<u8> {
        let mut encoded = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut encoded, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(bit_depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        encoded
    }

    fn rgb_png(pixels: &[[u8; 3]], width: u32, height: u32) -> Vec<u8> {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        encode(&data, width, height, png::ColorType::Rgb, png::BitDepth::Eight)
    }

    #[test]
    fn test_convert_image_rotated() {
        const B: [u8; 3] = [0, 0, 0];
        const W: [u8; 3] = [255, 255, 255];
        // 3x2: dark pixel at (0, 0) and (2, 1)
        let png = rgb_png(&[B, W, W, W, W, B], 3, 2);
        let decoded = crate::decode::decode_png(&png).unwrap();

        let bitmap = convert_image(&decoded, PackMode::Binarize, Rotation::NoRotation).unwrap();
        assert_eq!(bitmap.data(), &[0x80, 0x20]);

        let bitmap = convert_image(&decoded, PackMode::Binarize, Rotation::Rotate90).unwrap();
        assert_eq!(bitmap.size(), (2, 3).into());
        assert_eq!(bitmap.data(), &[0x40, 0x00, 0x80]);

        let bitmap = convert_image(&decoded, PackMode::Raw, Rotation::Rotate180).unwrap();
        assert_eq!(bitmap.format(), PackedFormat::Bytes(3));
        assert_eq!(bitmap.row(0), &[0, 0, 0, 255, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_convert_image_mono() {
        // 10x2 1-bit gray, 1 = light: dark pixels at (1, 0) and (8, 0)
        let png = encode(&[0b1011_1111, 0b0111_1111, 0xff, 0xff], 10, 2,
                         png::ColorType::Grayscale, png::BitDepth::One);
        let decoded = crate::decode::decode_png(&png).unwrap();

        let bitmap = convert_image(&decoded, PackMode::Binarize, Rotation::NoRotation).unwrap();
        assert_eq!(bitmap.format(), PackedFormat::Mono1Bpp);
        assert_eq!(bitmap.data(), &[0b0100_0000, 0b1000_0000, 0x00, 0x00]);

        // (x, 0) lands on (1, x) in the 2x10 result
        let bitmap = convert_image(&decoded, PackMode::Binarize, Rotation::Rotate90).unwrap();
        assert_eq!(bitmap.size(), (2, 10).into());
        assert_eq!(bitmap.data(), &[0, 0x40, 0, 0, 0, 0, 0, 0, 0x40, 0]);
    }

    #[test]
    fn test_run_writes_output() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("png2bin-{}-run.png", std::process::id()));
        let output = dir.join(format!("png2bin-{}-run.bin", std::process::id()));
        std::fs::write(&input, rgb_png(&[[0, 0, 0], [1, 2, 3]], 2, 1)).unwrap();

        run(&ConvertOptions {
            input: input.clone(),
            output: output.clone(),
            rotation: Rotation::Rotate270,
            pack_mode: PackMode::Binarize,
            preview: None,
            dump: false,
        })
        .unwrap();

        // 2x1 turns into 1x2, the dark pixel ends up at the bottom
        assert_eq!(std::fs::read(&output).unwrap(), vec![0x00, 0x80]);
        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn test_run_failure_writes_nothing() {
        let output = std::env::temp_dir().join(format!("png2bin-{}-fail.bin", std::process::id()));
        let result = run(&ConvertOptions {
            input: PathBuf::from("/nonexistent/input.png"),
            output: output.clone(),
            rotation: Rotation::NoRotation,
            pack_mode: PackMode::Binarize,
            preview: None,
            dump: false,
        });
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
