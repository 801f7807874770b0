//! Abstract render surface and the per-frame draw order
//!
//! The core only knows how to name a sprite and where it goes. A host
//! implements `Canvas` on top of whatever graphics API it has.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{
    AttackKind, Enemy, EnemyKind, Facing, GemColor, ItemKind, Modifier, TileKind, World,
};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Grass,
    DeadGrass,
    Stone,
    DarkStone,
    Water,
    Lava,
    StartMarker,
    Door,
    Rock,
    Key,
    Heart,
    Gem(GemColor),
    SmallHeart,
    SmallKey,
    HadoukenLeft,
    HadoukenRight,
    FrontEnd,
    Bug,
    Charger,
    ChargerCharging,
    Sidestepper,
    Backtracker,
    BacktrackerReverse,
    Slowpoke,
    Centipede,
    Cow,
    CowReverse,
    CowCentipede,
    Player,
    PlayerBlink(u8),
    Udacity,
}

impl Sprite {
    /// Asset path relative to the game root
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Grass => "images/grass-block.png",
            Sprite::DeadGrass => "images/dead-grass-block.png",
            Sprite::Stone => "images/stone-block.png",
            Sprite::DarkStone => "images/dark-stone-block.png",
            Sprite::Water => "images/water-block.png",
            Sprite::Lava => "images/lava-block.png",
            Sprite::StartMarker => "images/nothing.png",
            Sprite::Door => "images/Door.png",
            Sprite::Rock => "images/Rock.png",
            Sprite::Key => "images/Key.png",
            Sprite::Heart => "images/Heart.png",
            Sprite::Gem(GemColor::Blue) => "images/Gem Blue.png",
            Sprite::Gem(GemColor::Green) => "images/Gem Green.png",
            Sprite::Gem(GemColor::Orange) => "images/Gem Orange.png",
            Sprite::SmallHeart => "images/Heart-small.png",
            Sprite::SmallKey => "images/Key-Small.png",
            Sprite::HadoukenLeft => "images/Hadouken-left.png",
            Sprite::HadoukenRight => "images/Hadouken-right.png",
            Sprite::FrontEnd => "images/Front-End.png",
            Sprite::Bug => "images/enemy-bug.png",
            Sprite::Charger => "images/charger.png",
            Sprite::ChargerCharging => "images/charger-charging.png",
            Sprite::Sidestepper => "images/sidestepper.png",
            Sprite::Backtracker => "images/backtracker.png",
            Sprite::BacktrackerReverse => "images/backtracker-reverse.png",
            Sprite::Slowpoke => "images/slowpoke.png",
            Sprite::Centipede => "images/centipede.png",
            Sprite::Cow => "images/Cow.png",
            Sprite::CowReverse => "images/Cow-reverse.png",
            Sprite::CowCentipede => "images/Cow-centipede.png",
            Sprite::Player => "images/char-boy.png",
            Sprite::PlayerBlink(1) => "images/char-boy-blink1.png",
            Sprite::PlayerBlink(2) => "images/char-boy-blink2.png",
            Sprite::PlayerBlink(_) => "images/char-boy-blink3.png",
            Sprite::Udacity => "images/Udacity.png",
        }
    }
}

/// Text presets used by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// 20px pixel font, black, left aligned
    Score,
    /// 60px bold, #00a7ff, centered
    Shout,
}

/// A draw target with the 707x606 logical raster
pub trait Canvas {
    /// Fill the whole surface with the background color
    fn clear(&mut self);
    /// Draw `sprite` with its top-left at `pos`; `alpha` in 0..=1
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, alpha: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
    /// Invert every pixel's color
    fn invert_colors(&mut self);
}

const SPRITE_LIFT: f32 = 20.0;
const LIFE_SPACING: f32 = 50.0;
const BLINK_FRAME_SECS: f64 = 0.1;

/// Draw one frame of `world`
pub fn draw(world: &World, canvas: &mut impl Canvas) {
    canvas.clear();
    draw_map(world, canvas);
    draw_entities(world, canvas);
    draw_hud(world, canvas);
    if world.state.level < 0 || world.state.has(Modifier::TimeReversal) {
        canvas.invert_colors();
    }
}

fn draw_map(world: &World, canvas: &mut impl Canvas) {
    let dark = world.state.level > world.tuning.dark_level;
    for tile in &world.map.tiles {
        let sprite = match (tile.kind, dark) {
            (TileKind::Grass, false) => Sprite::Grass,
            (TileKind::Grass, true) => Sprite::DeadGrass,
            (TileKind::Stone, false) => Sprite::Stone,
            (TileKind::Stone, true) => Sprite::DarkStone,
            (TileKind::Water, false) => Sprite::Water,
            (TileKind::Water, true) => Sprite::Lava,
        };
        canvas.draw_sprite(sprite, tile.pos.to_pixel(), 1.0);
    }

    let lifted = |pos: Vec2| pos - Vec2::new(0.0, SPRITE_LIFT);
    canvas.draw_sprite(Sprite::StartMarker, lifted(world.map.start.to_pixel()), 1.0);
    canvas.draw_sprite(Sprite::Door, lifted(world.map.end.to_pixel()), 1.0);
    for rock in &world.map.rocks {
        canvas.draw_sprite(Sprite::Rock, lifted(rock.to_pixel()), 1.0);
    }
}

fn draw_entities(world: &World, canvas: &mut impl Canvas) {
    for item in &world.items {
        let (sprite, alpha) = match item.kind {
            ItemKind::Key => (Sprite::Key, 1.0),
            ItemKind::Heart => (Sprite::Heart, 1.0),
            ItemKind::Gem(gem) => (Sprite::Gem(gem.color), if gem.fading { 0.5 } else { 1.0 }),
        };
        canvas.draw_sprite(sprite, item.tile.to_pixel() - Vec2::new(0.0, SPRITE_LIFT), alpha);
    }

    for attack in &world.attacks {
        let (sprite, offset) = match (attack.kind, attack.facing()) {
            (AttackKind::ShortRange, Facing::Left) => (Sprite::HadoukenLeft, 40.0),
            (AttackKind::ShortRange, Facing::Right) => (Sprite::HadoukenRight, 40.0),
            (AttackKind::WideRange, _) => (Sprite::FrontEnd, Y_STEP - 30.0),
        };
        canvas.draw_sprite(sprite, attack.pos + Vec2::new(0.0, offset), 1.0);
    }

    let cows = world.state.has(Modifier::Cows);
    for enemy in &world.enemies {
        canvas.draw_sprite(
            enemy_sprite(enemy, cows),
            enemy.pos - Vec2::new(0.0, SPRITE_LIFT),
            1.0,
        );
    }

    let player = &world.player;
    let origin = player.tile.to_pixel();
    if world.state.has(Modifier::Udacious) {
        canvas.draw_sprite(Sprite::Udacity, origin + Vec2::new(0.0, SPRITE_LIFT), 1.0);
    } else {
        let sprite = if player.invincible {
            let frame = (world.clock / BLINK_FRAME_SECS) as u64 % 3;
            Sprite::PlayerBlink(frame as u8 + 1)
        } else {
            Sprite::Player
        };
        canvas.draw_sprite(sprite, origin - Vec2::new(0.0, SPRITE_LIFT), 1.0);
        if player.has_key {
            canvas.draw_sprite(Sprite::SmallKey, origin + Vec2::new(15.0, 70.0), 1.0);
        }
    }
}

/// Sprite for an enemy, honoring heading and the cow modifier
pub fn enemy_sprite(enemy: &Enemy, cows: bool) -> Sprite {
    let reverse = enemy.facing() == Facing::Left;
    match (enemy.kind, cows) {
        (EnemyKind::Centipede, true) => Sprite::CowCentipede,
        (EnemyKind::Backtracker, true) if reverse => Sprite::CowReverse,
        (_, true) => Sprite::Cow,
        (EnemyKind::Basic, false) => Sprite::Bug,
        (EnemyKind::Charger, false) if enemy.is_charging() => Sprite::ChargerCharging,
        (EnemyKind::Charger, false) => Sprite::Charger,
        (EnemyKind::Sidestepper, false) => Sprite::Sidestepper,
        (EnemyKind::Backtracker, false) if reverse => Sprite::BacktrackerReverse,
        (EnemyKind::Backtracker, false) => Sprite::Backtracker,
        (EnemyKind::Slowpoke, false) => Sprite::Slowpoke,
        (EnemyKind::Centipede, false) => Sprite::Centipede,
    }
}

/// Score caption, capped above the display threshold
pub fn score_text(score: i64) -> String {
    if score > SCORE_DISPLAY_CAP {
        "SCORE: A LOT!".to_string()
    } else {
        format!("SCORE: {score}")
    }
}

fn draw_hud(world: &World, canvas: &mut impl Canvas) {
    for i in 0..world.player.lives {
        canvas.draw_sprite(Sprite::SmallHeart, Vec2::new(f32::from(i) * LIFE_SPACING, -10.0), 1.0);
    }

    canvas.draw_text(&score_text(world.state.score), Vec2::new(400.0, 40.0), TextStyle::Score);

    if world.state.shout_active(world.clock) {
        let origin = world.player.tile.to_pixel();
        canvas.draw_text("HADOUKEN!!!", origin + Vec2::new(40.0, 30.0), TextStyle::Shout);
    }
}
