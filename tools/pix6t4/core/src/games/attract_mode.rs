use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use heapless::Vec as Pool;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use crate::animation::{paint_polar, Animation};
use crate::color::Color;
use crate::device::Device;
use crate::error::Error;
use crate::frame::{HEIGHT, WIDTH};
use crate::game::Game;
use crate::inputs::Button;

/// Frame counters of the hue animations wrap here.
const HUE_FRAMES: u32 = 360;

/// Hue bands sliding sideways.
#[derive(Debug, Default)]
pub struct Rainbow {
    frame: u32,
}

impl Animation for Rainbow {
    fn frame_number(&self) -> u32 {
        self.frame
    }

    fn advance(&mut self) {
        self.frame = (self.frame + 1) % HUE_FRAMES;
    }

    fn pixel_color(&mut self, x: i32, _y: i32, _radius: f32, _angle: f32) -> Result<Color, Error> {
        let hue = ((x as u32 * 2 + self.frame) * 5) % 360;
        Ok(Color::from_hsl(hue as f32, 100.0, 50.0)?)
    }
}

/// Hue wheel spinning around the centre.
#[derive(Debug, Default)]
pub struct BeachBall {
    frame: u32,
}

impl Animation for BeachBall {
    fn frame_number(&self) -> u32 {
        self.frame
    }

    fn advance(&mut self) {
        self.frame = (self.frame + 1) % HUE_FRAMES;
    }

    fn pixel_color(&mut self, _x: i32, _y: i32, _radius: f32, angle: f32) -> Result<Color, Error> {
        let hue = (angle + (self.frame * 4) as f32) % 360.0;
        Ok(Color::from_hsl(hue, 100.0, 50.0)?)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Droplet {
    x: f32,
    y: i32,
}

const MAX_DROPLETS: usize = 10;
const DROPLET_SPEED: f32 = 0.5;
const DROPLET_TRAIL: f32 = 8.0;
/// Droplets start up to this far left of the screen and vanish this far right.
const DROPLET_RANGE: f32 = 16.0;

/// Green rain falling sideways.
pub struct GhostInTheShell {
    frame: u32,
    rng: SmallRng,
    droplets: Pool<Droplet, MAX_DROPLETS>,
}

impl GhostInTheShell {
    pub fn new(seed: u64) -> Self {
        Self {
            frame: 0,
            rng: SmallRng::seed_from_u64(seed),
            droplets: Pool::new(),
        }
    }

    fn rain(&mut self) {
        if !self.droplets.is_full() {
            let droplet = Droplet {
                x: -self.rng.gen::<f32>() * DROPLET_RANGE,
                y: self.rng.gen_range(0..HEIGHT as i32),
            };
            let _ = self.droplets.push(droplet);
        }
        for droplet in self.droplets.iter_mut() {
            droplet.x += DROPLET_SPEED;
        }
        self.droplets.retain(|d| d.x <= DROPLET_RANGE);
    }
}

impl Animation for GhostInTheShell {
    fn frame_number(&self) -> u32 {
        self.frame
    }

    fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    fn pixel_color(&mut self, x: i32, y: i32, _radius: f32, _angle: f32) -> Result<Color, Error> {
        let intensity: f32 = self
            .droplets
            .iter()
            .filter(|d| d.y == y && (x as f32) < d.x)
            .map(|d| DROPLET_TRAIL - (d.x - x as f32).min(DROPLET_TRAIL))
            .sum();
        Ok(Color::rgb(0, (intensity * 32.0).min(255.0) as u8, 0))
    }

    fn draw_frame(&mut self, device: &mut Device) -> Result<(), Error> {
        device.cls(Color::BLACK);
        self.rain();
        paint_polar(self, device)?;
        self.advance();
        Ok(())
    }
}

/// Eye candy for the shop window. LEFT/RIGHT pick the animation.
pub struct AttractMode {
    animations: Vec<Box<dyn Animation>>,
    current: usize,
}

impl AttractMode {
    pub fn new(seed: u64) -> Self {
        Self {
            animations: vec![
                Box::new(Rainbow::default()),
                Box::new(BeachBall::default()),
                Box::new(GhostInTheShell::new(seed)),
            ],
            current: 0,
        }
    }

    pub fn current_animation(&self) -> usize {
        self.current
    }
}

impl Game for AttractMode {
    fn name(&self) -> &'static str {
        "Attract Mode"
    }

    fn priority(&self) -> i32 {
        8999
    }

    fn title_screen(&mut self, device: &mut Device) -> Result<(), Error> {
        for x in 0..WIDTH as i32 {
            let color = Color::from_hsl((x * 45) as f32, 100.0, 50.0)?;
            for y in 0..HEIGHT as i32 {
                device.plot(x, y, color);
            }
        }
        Ok(())
    }

    fn tick(&mut self, device: &mut Device) -> Result<(), Error> {
        self.animations[self.current].draw_frame(device)
    }

    fn button_pressed(&mut self, button: Button, _device: &mut Device) -> Result<(), Error> {
        let count = self.animations.len();
        match button {
            Button::Right => self.current = (self.current + 1) % count,
            Button::Left => self.current = (self.current + count - 1) % count,
            _ => {}
        }
        Ok(())
    }
}
