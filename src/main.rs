use arboard::Clipboard;
use isowalk::action_log::{Action, ActionLog};
use isowalk::input::{zoom_step, ArrowKeys, DragTracker};
use isowalk::projection::Viewport;
use isowalk::tick::TickDriver;
use isowalk::{Config, Direction, Grid, Point, Tile, World};
use macroquad::prelude::*;
use ::rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::fs;
use std::time::Duration;

fn window_conf() -> Conf {
    Conf {
        window_title: "isowalk".to_string(),
        window_width: 1024,
        window_height: 768,
        ..Default::default()
    }
}

/// Per-direction walk cycle, advanced once per tick while moving
struct WalkCycle {
    frame: usize,
}

impl WalkCycle {
    fn frames(direction: Direction) -> usize {
        match direction {
            Direction::E | Direction::W => 6,
            _ => 4,
        }
    }

    fn advance(&mut self, direction: Direction) {
        self.frame = (self.frame + 1) % Self::frames(direction);
    }
}

fn build_world(config: &Config) -> Result<World, Box<dyn Error>> {
    let mut rng = match config.world.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let world = match &config.world.layout_file {
        Some(path) => {
            let layout = fs::read_to_string(path)?;
            World::with_grid(Grid::from_layout(&layout)?, config, &mut rng)?
        }
        None => World::generate(config, &mut rng)?,
    };
    Ok(world)
}

fn copy_layout_to_clipboard(grid: &Grid) {
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(grid.to_layout()) {
                log::warn!("Failed to copy to clipboard: {}", e);
            } else {
                log::info!("Grid layout copied to clipboard");
                // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                std::thread::sleep(Duration::from_millis(100));
            }
        }
        Err(e) => log::warn!("Failed to access clipboard: {}", e),
    }
}

fn to_vec2(p: Point) -> Vec2 {
    vec2(p.x, p.y)
}

fn draw_tile(world: &World, viewport: &Viewport, tile: Tile) {
    let size = world.tile_size();
    let corner = |dx: i32, dy: i32| {
        let p = Point::new((tile.x + dx) as f32, (tile.y + dy) as f32).mult(size);
        to_vec2(viewport.world_to_screen(p))
    };
    let (top, right, bottom, left) = (corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1));
    let ground = Color::from_rgba(92, 140, 70, 255);
    draw_triangle(top, right, bottom, ground);
    draw_triangle(top, bottom, left, ground);
    let edge = Color::from_rgba(60, 100, 50, 255);
    draw_line(top.x, top.y, right.x, right.y, 1.0, edge);
    draw_line(top.x, top.y, left.x, left.y, 1.0, edge);

    if world.is_obstacle(tile) {
        let base = to_vec2(viewport.world_to_screen(tile.center(size)));
        draw_rectangle(base.x - size * 0.06, base.y - size * 0.3, size * 0.12, size * 0.3, BROWN);
        draw_triangle(
            vec2(base.x, base.y - size * 1.1),
            vec2(base.x - size * 0.35, base.y - size * 0.25),
            vec2(base.x + size * 0.35, base.y - size * 0.25),
            DARKGREEN,
        );
    }
}

fn draw_character(world: &World, viewport: &Viewport, cycle: &WalkCycle) {
    let size = world.tile_size();
    let character = world.character();
    let feet = to_vec2(viewport.world_to_screen(character.position()));
    let bob = if character.is_moving() && cycle.frame % 2 == 1 { size * 0.04 } else { 0.0 };
    let radius = size * 0.18;
    draw_circle(feet.x, feet.y - radius - bob, radius, BLUE);

    let facing = projection_facing(character.direction());
    draw_line(
        feet.x,
        feet.y - radius - bob,
        feet.x + facing.x * radius * 1.5,
        feet.y - radius - bob + facing.y * radius * 1.5,
        2.0,
        WHITE,
    );
}

/// Screen-space unit vector the character is facing
fn projection_facing(direction: Direction) -> Vec2 {
    let iso = isowalk::projection::to_isometric(direction.vector());
    let v = vec2(iso.x, iso.y);
    if v.length() > 0.0 {
        v.normalize()
    } else {
        v
    }
}

fn draw_world(world: &World, viewport: &Viewport, cycle: &WalkCycle) {
    // Row-major order paints back to front
    for y in 0..world.height() {
        for x in 0..world.width() {
            let tile = Tile::new(x, y);
            draw_tile(world, viewport, tile);
            if world.character().tile() == tile {
                draw_character(world, viewport, cycle);
            }
        }
    }
}

fn read_arrows() -> ArrowKeys {
    ArrowKeys {
        up: is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
    }
}

fn pointer() -> Point {
    let (x, y) = mouse_position();
    Point::new(x, y)
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::load();
    let mut world = build_world(&config)?;
    let mut viewport = Viewport::new(Point::new(screen_width() / 2.0, 0.0));
    let mut driver = TickDriver::new(config.view.tick_rate_hz, config.view.max_ticks_per_frame);
    let mut drag = DragTracker::default();
    let mut arrows = ArrowKeys::default();
    let mut cycle = WalkCycle { frame: 0 };
    let mut action_log = ActionLog::new();
    let background = Color::from_rgba(
        config.view.background_r,
        config.view.background_g,
        config.view.background_b,
        255,
    );

    loop {
        if is_mouse_button_pressed(MouseButton::Left) {
            drag.press(pointer(), viewport.offset);
        }
        if drag.is_pressed() {
            if let Some(offset) = drag.moved(pointer()) {
                viewport.offset = offset;
            }
        }
        if is_mouse_button_released(MouseButton::Left) {
            if let Some(screen) = drag.release(pointer()) {
                let target = viewport.screen_to_world(screen);
                let tile = world.pixel_to_tile(target);
                action_log.log(Action::Click { tile });
                if !world.is_click_target(tile) {
                    action_log.log(Action::IgnoredClick { tile });
                } else {
                    match world.click(target) {
                        Some(steps) => action_log.log(Action::PathFound { to: tile, steps }),
                        None => action_log.log(Action::NoPath { to: tile }),
                    }
                }
            }
        }

        let (_, wheel) = mouse_wheel();
        if wheel != 0.0 {
            let next = zoom_step(
                world.tile_size(),
                wheel > 0.0,
                config.view.zoom_step,
                config.view.min_tile_size,
            );
            if let Some(tile_size) = next {
                world.change_tile_size(tile_size)?;
                action_log.log(Action::Zoom { tile_size });
            }
        }

        let pressed = read_arrows();
        if pressed != arrows {
            arrows = pressed;
            match arrows.direction() {
                Some(direction) => {
                    world.steer(direction);
                    action_log.log(Action::Steer { direction });
                }
                None => {
                    world.release();
                    action_log.log(Action::Release);
                }
            }
        }

        if is_key_pressed(KeyCode::C) {
            copy_layout_to_clipboard(world.grid());
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let elapsed = Duration::from_secs_f32(get_frame_time());
        driver.run(elapsed, || {
            if world.character().is_moving() {
                cycle.advance(world.character().direction());
            }
            world.tick();
        });

        clear_background(background);
        draw_world(&world, &viewport, &cycle);
        draw_text(
            "Click: walk  Arrows: move  Drag: pan  Wheel: zoom  C: copy map  Esc: quit",
            10.0,
            20.0,
            20.0,
            WHITE,
        );

        next_frame().await
    }

    log::info!("\n{}", action_log.summary());
    if config.logging.enable_action_log {
        action_log.save_to_file(&config.logging.action_log_path)?;
        log::info!("Action log saved to {}", config.logging.action_log_path);
    }
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
