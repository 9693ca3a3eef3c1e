use alloc::vec::Vec;
use log::{debug, info};
use crate::bitmap::{Bitmap, Canvas};
use crate::color::Color;
use crate::device::Device;
use crate::error::Error;
use crate::frame::{HEIGHT, WIDTH};
use crate::game::Game;
use crate::inputs::{Button, Direction};

/// Ticks between two steps of the player.
const PLAYER_SLOWNESS: u32 = 3;
const CANDY_POINTS: u32 = 1;
const COOKIE_POINTS: u32 = 5;

/// Maze index and wall color of each round; play cycles through them.
const ROUNDS: [(usize, Color); 3] = [(0, Color::PINK), (0, Color::PINK), (1, Color::LIGHT_BLUE)];

const TITLE: &str = concat!(
    "#rrYYY##\n",
    "rBrYYYY#\n",
    "rrYYBYrr\n",
    "YYYYYY##\n",
    "YYYY####\n",
    "YYYYYYrr\n",
    "#YYYYYY#\n",
    "##YYYY##\n",
);

// `#` wall, `.` candy, `o` cookie, `-` ghost house door, `<` player start.
const MAZES: [&str; 4] = [
    concat!(
        "##################\n",
        "#....#.......#....\n",
        "#o##.#.#####.#.##o\n",
        "#.................\n",
        "##.#.###.#.###.#.#\n",
        "  .#.....#.....#. \n",
        "##.### ##### ###.#\n",
        "##.             .#\n",
        "##.### ##-## ###.#\n",
        "##.#   #####   #.#\n",
        "  .  #       #  .#\n",
        "##.##### # #####.#\n",
        "##.....  #  .....#\n",
        "##.###.#####.###.#\n",
        "#........<........\n",
        "#.##.###.#.###.##.\n",
        "#.##.#...#...#.##.\n",
        "#o##.#.#####.#.##o\n",
        "#.................\n",
        "##################\n",
    ),
    concat!(
        "##################\n",
        "     #.......#    \n",
        "#### #.#####.# ###\n",
        "#o.......#.......o\n",
        "#.####.#.#.#.####.\n",
        "#.#....#...#....#.\n",
        "#.#.## ##### ##.#.\n",
        "#....#       #....\n",
        "####.# ##-## #.###\n",
        "#....# #   # #....\n",
        "#.##.  #####  .##.\n",
        "#..#.#       #.#..\n",
        "##.#.## ### ##.#.#\n",
        "##......###......#\n",
        "##.####.###.####.#\n",
        "  ...#..   ..#... \n",
        "##.#.#.#####.#.#.#\n",
        "#o.#.....#.....#.o\n",
        "#.##.###.#.###.##.\n",
        "#.................\n",
        "##################\n",
    ),
    concat!(
        "##################\n",
        "#......#...#......\n",
        "#o####.#.#.#.####o\n",
        "#.#......#......#.\n",
        "#...#.##.#.##.#...\n",
        "###.#.........#.##\n",
        " ...## ##### ##...\n",
        "#.#             #.\n",
        "#.## # ##-## # ##.\n",
        "#.   # #   # #   .\n",
        "#.# ## ##### ## #.\n",
        "#.#             #.\n",
        "#.## ### # ### ##.\n",
        "#....#...#...#....\n",
        "##.#.#.#####.#.#.#\n",
        "#o.#.....<.....#.o\n",
        "#.##.###.#.###.##.\n",
        "#....#...#...#....\n",
        "#.##.#.#####.#.##.\n",
        "#....#.......#....\n",
        "##################\n",
    ),
    concat!(
        "##################\n",
        "#.................\n",
        "#o#.##.#####.##.#o\n",
        "#.#....#...#....#.\n",
        "#.##.#.#.#.#.#.##.\n",
        "#....#...#...#....\n",
        "##.#####.#.#####.#\n",
        "##...#       #...#\n",
        "   #.# ##-## #.#  \n",
        "####.  #####  .###\n",
        "   #.#       #.#  \n",
        "##...### # ###...#\n",
        "##.#...  #  ...#.#\n",
        "##.###.# # #.###.#\n",
        "#......# < #......\n",
        "#.##.#.#####.#.##.\n",
        "#.#..#.......#..#.\n",
        "#o#.####.#.####.#o\n",
        "#........#........\n",
        "##################\n",
    ),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tile {
    Wall,
    Door,
    Candy,
    Cookie,
    Floor,
}

impl Tile {
    fn parse(c: char) -> Tile {
        match c {
            '#' => Tile::Wall,
            '-' => Tile::Door,
            '.' => Tile::Candy,
            'o' => Tile::Cookie,
            _ => Tile::Floor,
        }
    }

    fn is_open(self) -> bool {
        !matches!(self, Tile::Wall | Tile::Door)
    }

    fn is_food(self) -> bool {
        matches!(self, Tile::Candy | Tile::Cookie)
    }
}

/// Maze chase, minus the ghosts.
///
/// The maze is larger than the screen; an 8×8 viewport follows the player.
/// A d-pad press queues a turn that is taken as soon as the maze allows,
/// until then the player keeps going. Clearing all candy and cookies
/// moves on to the next round.
pub struct MsPixMan {
    round: usize,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    field: Bitmap,
    player: (i32, i32),
    heading: (i32, i32),
    wanted: (i32, i32),
    food_left: usize,
    score: u32,
    frame_number: u32,
}

impl MsPixMan {
    pub fn new() -> Self {
        Self {
            round: 0,
            width: 0,
            height: 0,
            tiles: Vec::new(),
            field: Bitmap::new(0, 0),
            player: (0, 0),
            heading: (0, 0),
            wanted: (0, 0),
            food_left: 0,
            score: 0,
            frame_number: 0,
        }
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> (i32, i32) {
        self.player
    }

    pub fn food_left(&self) -> usize {
        self.food_left
    }

    fn load_round(&mut self) -> Result<(), Error> {
        let (maze, wall) = ROUNDS[self.round % ROUNDS.len()];
        let art = MAZES[maze];
        let palette = [
            ('#', wall),
            ('-', wall.with_brightness(0.5)?),
            ('.', Color::GREY),
            ('o', Color::WHITE),
            ('<', Color::BLACK),
            (' ', Color::BLACK),
        ];
        self.field = Bitmap::from_ascii_art(art, &palette);
        self.width = self.field.width() as i32;
        self.height = self.field.height() as i32;

        self.tiles.clear();
        let mut start = None;
        for (y, line) in art.lines().enumerate() {
            for (x, c) in line.chars().enumerate() {
                if c == '<' {
                    start = Some((x as i32, y as i32));
                }
                self.tiles.push(Tile::parse(c));
            }
        }

        self.player = start.unwrap_or_else(|| self.fallback_start());
        self.heading = (0, 0);
        self.wanted = (0, 0);
        self.food_left = self.tiles.iter().filter(|t| t.is_food()).count();
        info!("round {}: maze {maze}, {} bites to eat", self.round, self.food_left);
        Ok(())
    }

    /// The open tile closest to the lower middle of the maze.
    fn fallback_start(&self) -> (i32, i32) {
        let target = (self.width / 2, self.height * 3 / 4);
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.tile(x, y).is_open())
            .min_by_key(|&(x, y)| (x - target.0).abs() + (y - target.1).abs())
            .unwrap_or((0, 0))
    }

    fn wrap(&self, x: i32, y: i32) -> (i32, i32) {
        (x.rem_euclid(self.width.max(1)), y.rem_euclid(self.height.max(1)))
    }

    fn tile(&self, x: i32, y: i32) -> Tile {
        let (x, y) = self.wrap(x, y);
        self.tiles.get((y * self.width + x) as usize).copied().unwrap_or(Tile::Wall)
    }

    fn can_go(&self, (dx, dy): (i32, i32)) -> bool {
        (dx, dy) != (0, 0) && self.tile(self.player.0 + dx, self.player.1 + dy).is_open()
    }

    fn step(&mut self, device: &mut Device) -> Result<(), Error> {
        if self.can_go(self.wanted) {
            self.heading = self.wanted;
        }
        if !self.can_go(self.heading) {
            return Ok(());
        }
        self.player = self.wrap(self.player.0 + self.heading.0, self.player.1 + self.heading.1);

        let (x, y) = self.player;
        let index = (y * self.width + x) as usize;
        let points = match self.tiles[index] {
            Tile::Candy => {
                device.beep(880, 20);
                CANDY_POINTS
            }
            Tile::Cookie => {
                device.beep(220, 150);
                COOKIE_POINTS
            }
            _ => return Ok(()),
        };
        self.tiles[index] = Tile::Floor;
        self.field.set_pixel(x, y, Color::BLACK);
        self.score += points;
        self.food_left -= 1;

        if self.food_left == 0 {
            debug!("round {} cleared with {} points", self.round, self.score);
            device.beep(660, 300);
            self.round += 1;
            self.load_round()?;
        }
        Ok(())
    }

    fn render(&self, device: &mut Device) {
        let view_x = (self.player.0 - WIDTH as i32 / 2 + 1).clamp(0, (self.width - WIDTH as i32).max(0));
        let view_y = (self.player.1 - HEIGHT as i32 / 2 + 1).clamp(0, (self.height - HEIGHT as i32).max(0));
        device.cls(Color::BLACK);
        self.field.blit(view_x as usize, view_y as usize, WIDTH, HEIGHT, &mut device.frame);
        device.plot(self.player.0 - view_x, self.player.1 - view_y, Color::YELLOW);
    }
}

impl Default for MsPixMan {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for MsPixMan {
    fn name(&self) -> &'static str {
        "Ms. Pix-Man"
    }

    fn title_screen(&mut self, device: &mut Device) -> Result<(), Error> {
        Bitmap::from_ascii_art(TITLE, &[]).blit(0, 0, WIDTH, HEIGHT, &mut device.frame);
        Ok(())
    }

    fn start(&mut self, device: &mut Device) -> Result<(), Error> {
        self.round = 0;
        self.score = 0;
        self.frame_number = 0;
        self.load_round()?;
        self.render(device);
        Ok(())
    }

    fn tick(&mut self, device: &mut Device) -> Result<(), Error> {
        self.frame_number += 1;
        if self.frame_number % PLAYER_SLOWNESS == 0 {
            self.step(device)?;
        }
        self.render(device);
        Ok(())
    }

    fn button_pressed(&mut self, button: Button, _device: &mut Device) -> Result<(), Error> {
        let direction = button.direction();
        if direction != Direction::empty() {
            self.wanted = direction.delta();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> (MsPixMan, Device) {
        let mut device = Device::default();
        let mut game = MsPixMan::new();
        game.start(&mut device).unwrap();
        (game, device)
    }

    fn steps(game: &mut MsPixMan, device: &mut Device, n: u32) {
        for _ in 0..n * PLAYER_SLOWNESS {
            game.tick(device).unwrap();
        }
    }

    #[test]
    fn starts_on_the_marker_with_the_viewport_around_it() {
        let (game, device) = started();
        assert_eq!(game.player(), (9, 14));
        assert_eq!(game.round(), 0);
        // viewport origin is (6, 11)
        assert_eq!(device.pixel(3, 3), Some(Color::YELLOW));
        assert_eq!(device.pixel(0, 0), Some(Color::PINK));
        assert_eq!(device.pixel(2, 3), Some(Color::GREY));
    }

    #[test]
    fn eats_candy_along_the_way() {
        let (mut game, mut device) = started();
        let food = game.food_left();
        game.button_pressed(Button::Left, &mut device).unwrap();
        steps(&mut game, &mut device, 2);

        assert_eq!(game.player(), (7, 14));
        assert_eq!(game.score(), 2 * CANDY_POINTS);
        assert_eq!(game.food_left(), food - 2);
        assert_eq!(game.field.pixel(8, 14), Some(Color::BLACK));
    }

    #[test]
    fn walls_stop_the_player() {
        let (mut game, mut device) = started();
        game.button_pressed(Button::Down, &mut device).unwrap();
        steps(&mut game, &mut device, 3);
        // (9, 15) is a wall
        assert_eq!(game.player(), (9, 14));
    }

    #[test]
    fn queued_turn_waits_for_an_opening() {
        let (mut game, mut device) = started();
        game.button_pressed(Button::Right, &mut device).unwrap();
        steps(&mut game, &mut device, 1);
        assert_eq!(game.player(), (10, 14));

        // (10, 13) and (11, 13) are walls, (12, 13) is not
        game.button_pressed(Button::Up, &mut device).unwrap();
        steps(&mut game, &mut device, 2);
        assert_eq!(game.player(), (12, 14));
        steps(&mut game, &mut device, 1);
        assert_eq!(game.player(), (12, 13));
    }

    #[test]
    fn tunnels_wrap_around() {
        let (mut game, mut device) = started();
        game.player = (1, 5);
        game.button_pressed(Button::Left, &mut device).unwrap();
        steps(&mut game, &mut device, 2);
        assert_eq!(game.player(), (17, 5));
    }

    #[test]
    fn clearing_the_maze_starts_the_next_round() {
        let (mut game, mut device) = started();
        for tile in game.tiles.iter_mut().filter(|t| t.is_food()) {
            *tile = Tile::Floor;
        }
        let index = (14 * game.width + 8) as usize;
        game.tiles[index] = Tile::Cookie;
        game.food_left = 1;

        game.button_pressed(Button::Left, &mut device).unwrap();
        steps(&mut game, &mut device, 1);

        assert_eq!(game.round(), 1);
        assert_eq!(game.score(), COOKIE_POINTS);
        assert_eq!(game.player(), (9, 14));
        assert!(game.food_left() > 0);
    }

    #[test]
    fn maze_without_a_marker_still_has_a_start() {
        let mut game = MsPixMan::new();
        game.round = 2;
        game.load_round().unwrap();
        let (x, y) = game.player();
        assert!(game.tile(x, y).is_open());
        assert_eq!(game.field.pixel(0, 0), Some(Color::LIGHT_BLUE));
    }
}
