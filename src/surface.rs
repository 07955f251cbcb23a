/// Abstract render target, one pixel per grid cell.
///
/// The driver writes 8-bit RGB values and never depends on how pixels reach
/// the physical display; LED-matrix transport, terminals and test buffers all
/// sit behind this trait.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8);
}

/// In-memory RGB framebuffer backed by a flat row-major buffer.
///
/// The crate's reference surface: the demo binary renders into it, and tests
/// use it to assert exactly what the driver drew.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl FrameBuffer {
    /// Create an all-black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; (width as usize) * (height as usize)],
        }
    }

    /// Read back a pixel. Writes outside the buffer are ignored, so reads
    /// outside it return black.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0];
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

impl PixelSurface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = [r, g, b];
    }
}
