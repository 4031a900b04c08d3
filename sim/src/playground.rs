//! The default playground layout: ground, walls, title slabs, signboards,
//! link boxes and skill boxes.

use marble_core::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::physics::ShapeDesc;
use crate::scene::{MeshShape, Renderable};
use crate::session::Session;
use crate::textures::TextureSource;

/// Edge length of the square ground slab.
pub const GROUND_SIZE: f32 = 175.0;

const GROUND_THICKNESS: f32 = 0.5;
const WALL_THICKNESS: f32 = 0.125;
const WALL_HEIGHT: f32 = 4.0;
const WALL_CENTER_Y: f32 = 1.75;
const HORIZONTAL_BOARD_SIZE: Vec3 = Vec3::new(30.0, 15.0, 1.0);
const HORIZONTAL_BOARD_LIFT: f32 = 10.0;
const VERTICAL_BOARD_SIZE: Vec3 = Vec3::new(10.0, 15.0, 1.0);
const VERTICAL_BOARD_LIFT: f32 = 11.25;
const BOARD_BORDER_COLOR: u32 = 0x000000;

/// Which signboard mesh to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStyle {
    Horizontal,
    Vertical,
}

/// A textured signboard linking somewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub style: BoardStyle,
    /// Base position; the board is lifted by its style's height.
    pub position: [f32; 3],
    pub texture: String,
    pub url: String,
}

/// A textured box, optionally linking somewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBox {
    pub position: [f32; 3],
    /// Full edge lengths.
    pub size: [f32; 3],
    pub texture: String,
    /// Empty for boxes without a link.
    pub url: String,
    /// `0xRRGGBB` of the box body.
    pub color: u32,
    pub transparent: bool,
}

/// Every board and box placed by [`build`], with textures and targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCatalog {
    pub boards: Vec<Board>,
    pub boxes: Vec<LinkBox>,
}

impl Default for LinkCatalog {
    fn default() -> Self {
        let board = |style, position, texture: &str, url: &str| Board {
            style,
            position,
            texture: texture.to_string(),
            url: url.to_string(),
        };
        let link = |x: f32, texture: &str, url: &str, color, transparent| LinkBox {
            position: [x, 10.0, -70.0],
            size: [10.0, 10.0, 1.0],
            texture: texture.to_string(),
            url: url.to_string(),
            color,
            transparent,
        };
        let skill = |x: f32, z: f32, texture: &str, color| LinkBox {
            position: [x, 5.0, z],
            size: [5.0, 5.0, 1.0],
            texture: texture.to_string(),
            url: String::new(),
            color,
            transparent: false,
        };

        Self {
            boards: vec![
                board(
                    BoardStyle::Horizontal,
                    [-70.0, 2.5, -70.0],
                    "assets/marketcap.png",
                    "https://fanglee2003.github.io/",
                ),
                board(
                    BoardStyle::Horizontal,
                    [-30.0, 2.5, -70.0],
                    "assets/news.png",
                    "https://fanglee2003.github.io/news",
                ),
                board(
                    BoardStyle::Vertical,
                    [0.0, 1.25, -70.0],
                    "assets/login.png",
                    "https://fanglee2003.github.io/login",
                ),
            ],
            boxes: vec![
                link(
                    20.0,
                    "assets/github.png",
                    "https://github.com/fanglee2003/fanglee2003.github.io",
                    0x000000,
                    true,
                ),
                link(
                    40.0,
                    "assets/linkedin.png",
                    "https://www.linkedin.com/in/fang-lee/",
                    0x0077b5,
                    true,
                ),
                link(
                    60.0,
                    "assets/youtube.png",
                    "https://www.youtube.com/channel/UCE2DVy3_Pk3BdVUAs6U-3cg",
                    0xff0000,
                    false,
                ),
                link(
                    80.0,
                    "assets/blogspot.png",
                    "http://fanglee2003.blogspot.com/",
                    0xff5722,
                    false,
                ),
                skill(-50.0, 50.0, "assets/html.png", 0xe34c24),
                skill(-50.0, 25.0, "assets/css.png", 0x0c5c9c),
                skill(-50.0, -25.0, "assets/bootstrap.png", 0x7910f8),
                skill(-50.0, -50.0, "assets/threejs.png", 0xffffff),
                skill(50.0, 50.0, "assets/javascript.png", 0xf7df1e),
                skill(50.0, 25.0, "assets/reactjs.png", 0x222222),
                skill(50.0, -25.0, "assets/nodejs.png", 0x2c2c2c),
                skill(50.0, -50.0, "assets/mongodb.png", 0xffffff),
            ],
        }
    }
}

/// Counts of what [`build`] created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaygroundSummary {
    pub static_bodies: usize,
    pub interactive: usize,
    pub decorations: usize,
}

/// Populates `session` with the playground and spawns the ball.
///
/// `touch` selects the floor instructions for touch devices.
pub fn build(
    session: &mut Session,
    textures: &mut dyn TextureSource,
    catalog: &LinkCatalog,
    touch: bool,
) -> Result<PlaygroundSummary, SimError> {
    let mut summary = PlaygroundSummary::default();

    build_ground(session)?;
    summary.static_bodies += 1;

    for (name, x, z, size) in [
        ("wall +x", GROUND_SIZE / 2.0, 0.0, Vec3::new(WALL_THICKNESS, WALL_HEIGHT, GROUND_SIZE)),
        ("wall -x", -GROUND_SIZE / 2.0, 0.0, Vec3::new(WALL_THICKNESS, WALL_HEIGHT, GROUND_SIZE)),
        ("wall +z", 0.0, GROUND_SIZE / 2.0, Vec3::new(GROUND_SIZE, WALL_HEIGHT, WALL_THICKNESS)),
        ("wall -z", 0.0, -GROUND_SIZE / 2.0, Vec3::new(GROUND_SIZE, WALL_HEIGHT, WALL_THICKNESS)),
    ] {
        let wall = Renderable::cuboid(name, size)
            .with_translation(Vec3::new(x, WALL_CENTER_Y, z))
            .with_color(0xffffff)
            .with_opacity(0.75);
        session
            .factory()
            .create_static_body(wall, ShapeDesc::cuboid_from_size(size))?;
        summary.static_bodies += 1;
    }

    for (name, content, text_size, z, slab) in [
        ("title", "KRIPTO", 12.0, -10.0, Vec3::new(60.0, 20.0, 1.0)),
        ("subtitle", "Chang giong ai", 6.0, 0.0, Vec3::new(60.0, 10.0, 1.0)),
    ] {
        let text = Renderable::new(
            name,
            MeshShape::Text {
                content: content.to_string(),
                size: text_size,
            },
        )
        .with_translation(Vec3::new(0.0, 0.1, z))
        .casting_shadow();
        session
            .factory()
            .create_static_body(text, ShapeDesc::cuboid_from_size(slab))?;
        summary.static_bodies += 1;
    }

    for board in &catalog.boards {
        let (size, lift) = match board.style {
            BoardStyle::Horizontal => (HORIZONTAL_BOARD_SIZE, HORIZONTAL_BOARD_LIFT),
            BoardStyle::Vertical => (VERTICAL_BOARD_SIZE, VERTICAL_BOARD_LIFT),
        };
        let [x, y, z] = board.position;
        let node = Renderable::cuboid(format!("board {}", board.url), size)
            .with_translation(Vec3::new(x, y + lift, z))
            .with_texture(textures.load(&board.texture))
            .with_color(BOARD_BORDER_COLOR)
            .casting_shadow();
        session.factory().create_interactive_static_body(
            node,
            ShapeDesc::cuboid_from_size(size),
            board.url.clone(),
        )?;
        summary.static_bodies += 1;
        summary.interactive += 1;
    }

    for link in &catalog.boxes {
        let size = Vec3::new(link.size[0], link.size[1], link.size[2]);
        let [x, y, z] = link.position;
        let node = Renderable::cuboid(format!("box {}", link.texture), size)
            .with_translation(Vec3::new(x, y, z))
            .with_texture(textures.load(&link.texture))
            .with_color(link.color)
            .with_opacity(if link.transparent { 0.5 } else { 1.0 })
            .casting_shadow();
        session.factory().create_interactive_static_body(
            node,
            ShapeDesc::cuboid_from_size(size),
            link.url.clone(),
        )?;
        summary.static_bodies += 1;
        summary.interactive += 1;
    }

    summary.decorations += add_floor_labels(session, touch);

    let ball_texture = session
        .config()
        .ball
        .texture
        .clone()
        .map(|path| textures.load(&path));
    session.set_controlled_texture(ball_texture);
    session.spawn_controlled()?;

    log::info!(
        "Playground built: {} static bodies, {} interactive, {} decorations",
        summary.static_bodies,
        summary.interactive,
        summary.decorations
    );
    Ok(summary)
}

fn build_ground(session: &mut Session) -> Result<(), SimError> {
    let size = Vec3::new(GROUND_SIZE, GROUND_THICKNESS, GROUND_SIZE);
    let ground = Renderable::cuboid("ground", size)
        .with_translation(Vec3::new(0.0, -GROUND_THICKNESS / 2.0, 0.0))
        .with_color(0xffffff)
        .with_opacity(0.25);
    session
        .factory()
        .create_static_body(ground, ShapeDesc::cuboid_from_size(size))?;
    Ok(())
}

/// Grid overlay and floor text. These nodes have no body.
fn add_floor_labels(session: &mut Session, touch: bool) -> usize {
    let (move_text, touch_text) = if touch {
        (
            "Use the joystick in the bottom \nleft of the screen to move the ball.",
            "Touch boxes with your \nfinger to open links",
        )
    } else {
        (
            "Use the arrow keys on your \n keyboard to move the ball.",
            "Click on boxes with \nthe mouse to open links",
        )
    };
    let motto = "Steve Jobs\n\nSimple can be harder than complex: \
                 \nYou have to work hard to get your thinking clean to make it simple. \
                 \nBut it's worth it in the end because once you get there, you can move mountains.";

    let grid = Renderable::new(
        "grid",
        MeshShape::Grid {
            size: GROUND_SIZE,
            divisions: 20,
        },
    )
    .with_translation(Vec3::new(0.0, 0.005, 0.0))
    .with_color(0xffffff)
    .with_opacity(0.5);

    let label = |name: &str, content: &str, size: f32, z: f32| {
        Renderable::new(
            name,
            MeshShape::Label {
                content: content.to_string(),
                size,
            },
        )
        .with_translation(Vec3::new(0.0, 0.01, z))
    };

    let nodes = [
        grid,
        label("move instructions", move_text, 1.5, 10.0),
        label("link instructions", touch_text, 1.5, -50.0),
        label("motto", motto, 1.0, 50.0),
    ];
    let count = nodes.len();
    let scene = session.scene_mut();
    for node in nodes {
        scene.add(node);
    }
    count
}
