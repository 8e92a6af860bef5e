//! Rendering helpers built on the public module accessors.
//!
//! Everything here consumes only `{size, module, module_type}`; nothing
//! writes files. Callers wanting PNG output can save the returned image
//! buffers themselves.

use crate::qrcode::QrCode;

use image::{ImageBuffer, Luma, Rgb};

/*---- Utilities ----*/

/// Returns an SVG document depicting the given QR Code with `border`
/// quiet-zone modules on every side.
///
/// Horizontal runs of dark modules are merged into a single path command
/// each, so the output stays compact even at version 40. Lines use Unix
/// newlines regardless of the platform.
pub fn to_svg_string(qr: &QrCode, border: i32) -> String {
    assert!(
        (0..=(i32::MAX - qr.size()) / 2).contains(&border),
        "Border out of range"
    );
    let dimension = qr.size() + border * 2;
    let mut path = String::new();
    for y in 0..qr.size() {
        let mut x = 0;
        while x < qr.size() {
            if !qr.get_module(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < qr.size() && qr.get_module(x, y) {
                x += 1;
            }
            let run = x - start;
            path += &format!("M{},{}h{run}v1h-{run}z", start + border, y + border);
        }
    }
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
            "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n",
            "\t<path d=\"{1}\" fill=\"#000000\"/>\n",
            "</svg>\n",
        ),
        dimension, path
    )
}

/// Renders the QR Code as console art, two module rows per text line
/// using half-block glyphs.
///
/// # Example
///
/// ```rust
/// use qrgrid::{helper::to_console_string, QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Low).unwrap();
/// // Version 1 with a border of 4: 29 module rows pack into 15 lines.
/// assert_eq!(to_console_string(&qr, 4).lines().count(), 15);
/// ```
pub fn to_console_string(qr: &QrCode, border: i32) -> String {
    assert!(border >= 0, "Border must be non-negative");
    let mut result = String::new();
    let mut y = -border;
    while y < qr.size() + border {
        for x in -border..qr.size() + border {
            // Out-of-range rows read as light, covering the bottom half
            // of the last line when the height is odd.
            result.push(match (qr.get_module(x, y), qr.get_module(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        result.push('\n');
        y += 2;
    }
    result
}

/// Prints the given QrCode object to the console with a four-module
/// quiet zone.
pub fn print_qr(qr: &QrCode) {
    print!("{}", to_console_string(qr, 4));
}

/// Renders the QR Code into an in-memory grayscale image.
///
/// Each module becomes a `scale` by `scale` pixel square; `border` quiet
/// zone modules surround the symbol.
///
/// # Example
///
/// ```rust
/// use qrgrid::{helper::to_image_buffer, QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Low).unwrap();
/// let img = to_image_buffer(&qr, 4, 1);
/// // "Hello, World!" encodes at version 1 with a border of 4: 29 pixels.
/// assert_eq!(img.dimensions(), (29, 29));
/// ```
pub fn to_image_buffer(qr: &QrCode, border: i32, scale: u32) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    assert!(border >= 0, "Border must be non-negative");
    assert!(scale >= 1, "Scale must be positive");
    let dimension = ((qr.size() + 2 * border) as u32) * scale;
    ImageBuffer::from_fn(dimension, dimension, |px, py| {
        let x = (px / scale) as i32 - border;
        let y = (py / scale) as i32 - border;
        if qr.get_module(x, y) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    })
}

/// Renders the QR Code into an in-memory RGB image, coloring data
/// modules and function modules separately.
///
/// The per-module classification drives the styling: dark data modules
/// get `data_color`, dark function modules (finders, alignment, timing,
/// format, version) get `function_color`, everything else including the
/// quiet zone gets `light_color`.
pub fn to_rgb_image_buffer(
    qr: &QrCode,
    border: i32,
    scale: u32,
    data_color: Rgb<u8>,
    function_color: Rgb<u8>,
    light_color: Rgb<u8>,
) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    assert!(border >= 0, "Border must be non-negative");
    assert!(scale >= 1, "Scale must be positive");
    let dimension = ((qr.size() + 2 * border) as u32) * scale;
    ImageBuffer::from_fn(dimension, dimension, |px, py| {
        let x = (px / scale) as i32 - border;
        let y = (py / scale) as i32 - border;
        if !qr.get_module(x, y) {
            light_color
        } else if qr.module_type(x, y).map_or(false, |k| k.is_function()) {
            function_color
        } else {
            data_color
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qrcode::{ModuleType, QrCodeEcc};

    #[test]
    fn test_to_svg_string() {
        let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Low).unwrap();
        let svg = to_svg_string(&qr, 4);
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("viewBox=\"0 0 29 29\""));
        // The top edge of the top-left finder is a single 7-module run.
        assert!(svg.contains("M4,4h7v1h-7z"));
        // Runs are merged: nothing emits module-by-module commands for
        // the finder rows.
        assert!(!svg.contains("M4,4h1"));
    }

    #[test]
    fn test_console_string_shape() {
        let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Low).unwrap();
        let art = to_console_string(&qr, 4);
        let lines: Vec<&str> = art.lines().collect();
        // 29 module rows pack into 15 half-block lines of width 29.
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.chars().count() == 29));
        // The border lines are blank; the symbol itself is not.
        assert!(lines[0].chars().all(|c| c == ' '));
        assert!(lines[4].contains('█') || lines[4].contains('▀') || lines[4].contains('▄'));
    }

    #[test]
    fn test_image_buffer_dimensions() {
        let qr = QrCode::encode_text("Hello, world!", QrCodeEcc::Low).unwrap();
        assert_eq!(to_image_buffer(&qr, 4, 1).dimensions(), (29, 29));
        assert_eq!(to_image_buffer(&qr, 2, 3).dimensions(), (75, 75));
    }

    #[test]
    fn test_rgb_buffer_styles_by_type() {
        let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Low).unwrap();
        let data = Rgb([200u8, 0, 0]);
        let function = Rgb([0u8, 0, 200]);
        let light = Rgb([255u8, 255, 255]);
        let img = to_rgb_image_buffer(&qr, 0, 1, data, function, light);
        // The finder center is a dark function module.
        assert_eq!(qr.module_type(3, 3), Ok(ModuleType::FinderPattern));
        assert_eq!(*img.get_pixel(3, 3), function);
        // No pixel carries the data color unless its module is dark data.
        let mut saw_data = false;
        for y in 0..qr.size() {
            for x in 0..qr.size() {
                if *img.get_pixel(x as u32, y as u32) == data {
                    assert_eq!(qr.module_type(x, y), Ok(ModuleType::Data));
                    assert_eq!(qr.module(x, y), Ok(true));
                    saw_data = true;
                }
            }
        }
        assert!(saw_data);
    }
}
