use heapless::{Deque, Vec};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::device::Device;
use crate::error::Error;
use crate::frame::{HEIGHT, PIXELS, WIDTH};
use crate::game::Game;
use crate::inputs::Button;

const MAX_APPLES: usize = 3;
const APPLE_PROBABILITY: f64 = 0.5;
const START_SLOWNESS: u32 = 10;
const MIN_SLOWNESS: u32 = 2;

const TITLE: &str = concat!(
    " ###    \n",
    "#ggg##  \n",
    "#gYggg# \n",
    "#gggg#r \n",
    " ####  r\n",
    "  #gg#  \n",
    "   #gg# \n",
    "   #gg# \n",
);

type Cell = (i32, i32);

pub struct Snake {
    rng: SmallRng,
    body: Deque<Cell, PIXELS>,
    apples: Vec<Cell, MAX_APPLES>,
    heading: Cell,
    slowness: u32,
    frame_number: u32,
    alive: bool,
}

impl Snake {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            body: Deque::new(),
            apples: Vec::new(),
            heading: (0, 1),
            slowness: START_SLOWNESS,
            frame_number: 0,
            alive: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn slowness(&self) -> u32 {
        self.slowness
    }

    /// Tail to head.
    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn apples(&self) -> &[Cell] {
        &self.apples
    }

    fn paint_body(&self, device: &mut Device, color: Color) {
        for &(x, y) in self.body.iter() {
            device.plot(x, y, color);
        }
    }

    fn maybe_drop_apple(&mut self, device: &mut Device) {
        if self.apples.is_full() || !self.rng.gen_bool(APPLE_PROBABILITY) {
            return;
        }
        let cell = (self.rng.gen_range(0..WIDTH as i32), self.rng.gen_range(0..HEIGHT as i32));
        if self.body.iter().any(|&c| c == cell) || self.apples.contains(&cell) {
            return;
        }
        if self.apples.push(cell).is_ok() {
            device.plot(cell.0, cell.1, Color::RED);
        }
    }

    fn die(&mut self, device: &mut Device) {
        debug!("snake bit itself at length {}", self.body.len());
        self.paint_body(device, Color::RED);
        self.alive = false;
        device.beep(100, 500);
    }
}

impl Game for Snake {
    fn name(&self) -> &'static str {
        "Snake"
    }

    fn title_screen(&mut self, device: &mut Device) -> Result<(), Error> {
        Bitmap::from_ascii_art(TITLE, &[('#', Color::rgb(0, 64, 0))]).blit(0, 0, WIDTH, HEIGHT, &mut device.frame);
        Ok(())
    }

    fn start(&mut self, device: &mut Device) -> Result<(), Error> {
        device.cls(Color::BLACK);
        self.body.clear();
        self.apples.clear();
        for cell in [(4, 4), (4, 5)] {
            // capacity is the whole board
            let _ = self.body.push_back(cell);
        }
        self.paint_body(device, Color::GREEN);
        self.heading = (0, 1);
        self.slowness = START_SLOWNESS;
        self.frame_number = 0;
        self.alive = true;
        Ok(())
    }

    fn tick(&mut self, device: &mut Device) -> Result<(), Error> {
        self.frame_number += 1;
        if self.frame_number % self.slowness != 0 || !self.alive {
            return Ok(());
        }

        self.maybe_drop_apple(device);

        let Some(&(x, y)) = self.body.back() else {
            return Ok(());
        };
        let head = (
            (x + self.heading.0).rem_euclid(WIDTH as i32),
            (y + self.heading.1).rem_euclid(HEIGHT as i32),
        );

        if self.body.iter().any(|&c| c == head) || self.body.push_back(head).is_err() {
            self.die(device);
            return Ok(());
        }
        device.plot(head.0, head.1, Color::GREEN);

        if let Some(i) = self.apples.iter().position(|&a| a == head) {
            self.apples.swap_remove(i);
            if self.slowness > MIN_SLOWNESS {
                self.slowness -= 1;
            }
            device.beep(440, 100);
        } else if let Some((tx, ty)) = self.body.pop_front() {
            device.plot(tx, ty, Color::BLACK);
        }
        Ok(())
    }

    fn button_pressed(&mut self, button: Button, _device: &mut Device) -> Result<(), Error> {
        if !button.is_dpad() {
            return Ok(());
        }
        let heading = button.direction().delta();
        if heading != (-self.heading.0, -self.heading.1) {
            self.heading = heading;
        }
        Ok(())
    }
}
