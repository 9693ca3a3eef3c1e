use core::f32::consts::PI;
use crate::color::Color;
use crate::device::Device;
use crate::error::Error;
use crate::frame::{HEIGHT, WIDTH};

const CENTER_X: f32 = WIDTH as f32 / 2.0;
const CENTER_Y: f32 = HEIGHT as f32 / 2.0;

/// A full-screen effect computed one cell at a time.
///
/// Implementors keep their own frame counter; [`Animation::draw_frame`]
/// paints every cell from [`Animation::pixel_color`] and then advances it.
pub trait Animation {
    fn frame_number(&self) -> u32;

    fn advance(&mut self);

    /// `radius` and `angle` (degrees, `[0, 360)`) are measured from the centre of the frame.
    fn pixel_color(&mut self, x: i32, y: i32, radius: f32, angle: f32) -> Result<Color, Error>;

    fn draw_frame(&mut self, device: &mut Device) -> Result<(), Error> {
        paint_polar(self, device)?;
        self.advance();
        Ok(())
    }
}

/// Evaluates `pixel_color` for every cell without advancing the frame counter.
pub fn paint_polar<A: Animation + ?Sized>(animation: &mut A, device: &mut Device) -> Result<(), Error> {
    for y in 0..HEIGHT as i32 {
        for x in 0..WIDTH as i32 {
            let (radius, angle) = polar(x, y);
            let color = animation.pixel_color(x, y, radius, angle)?;
            device.plot(x, y, color);
        }
    }
    Ok(())
}

/// Polar coordinates of a cell around the frame centre.
pub fn polar(x: i32, y: i32) -> (f32, f32) {
    let dx = x as f32 - CENTER_X;
    let dy = y as f32 - CENTER_Y;
    let radius = libm::sqrtf(dx * dx + dy * dy);
    let angle = (libm::atan2f(dy, dx) * 180.0 / PI + 180.0) % 360.0;
    (radius, angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) < 1e-3
    }

    #[test]
    fn polar_coordinates_around_the_centre() {
        let (r, a) = polar(4, 4);
        assert_eq!(r, 0.0);
        assert!(close(a, 180.0));

        let (r, a) = polar(7, 4);
        assert!(close(r, 3.0));
        assert!(close(a, 180.0));

        let (r, a) = polar(0, 4);
        assert!(close(r, 4.0));
        assert!(a < 1e-3 || a > 359.99);

        let (_, a) = polar(4, 0);
        assert!(close(a, 90.0));

        let (r, _) = polar(0, 0);
        assert!(close(r, libm::sqrtf(32.0)));
    }

    struct Gradient {
        frame: u32,
    }

    impl Animation for Gradient {
        fn frame_number(&self) -> u32 {
            self.frame
        }

        fn advance(&mut self) {
            self.frame += 1;
        }

        fn pixel_color(&mut self, x: i32, y: i32, _radius: f32, _angle: f32) -> Result<Color, Error> {
            Ok(Color::rgb(x as u8 * 10, y as u8 * 10, self.frame as u8))
        }
    }

    #[test]
    fn draw_frame_paints_every_cell_and_advances() {
        let mut device = Device::default();
        let mut gradient = Gradient { frame: 3 };
        gradient.draw_frame(&mut device).unwrap();

        assert_eq!(gradient.frame_number(), 4);
        assert_eq!(device.pixel(0, 0), Some(Color::rgb(0, 0, 3)));
        assert_eq!(device.pixel(7, 2), Some(Color::rgb(70, 20, 3)));
    }
}
