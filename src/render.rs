use crate::Cell;
use crate::snake::Direction::{self, *};
use crate::sprite::Sprite;
use crate::state::{GameState, RunState};
use crate::surface::{from_hex, BLACK, Color, CornerRadii, Fill, LinearGradient, Rect, Surface};

const HEAD_COLORS: (Color, Color) = (from_hex(0xff9933), from_hex(0xff6600));
const BODY_COLORS: (Color, Color) = (from_hex(0x4caf50), from_hex(0x388e3c));
const EYE_COLOR: Color = BLACK;

const SEGMENT_GAP: u32 = 2;
const EYE_SIZE: u32 = 3;
const EYE_INSET: i32 = 4;
const EYE_NEAR: i32 = 2;
// Distance of the forward-facing eyes from the far edge of the cell
const EYE_FAR_MARGIN: i32 = 8;

/// Redraws the whole frame for `state`.
pub fn render_frame<S: Surface>(surface: &mut S, state: &GameState, food: &Sprite, cell_size: u32) {
    surface.clear_all();

    if state.run_state() == RunState::Idle {
        return;
    }

    for (i, pos) in state.snake().body().iter().enumerate() {
        if i == 0 {
            draw_head(surface, *pos, state.direction(), cell_size);
        } else {
            draw_segment(surface, *pos, cell_size);
        }
    }

    if let Some(pos) = state.food() {
        let (x, y) = to_pixels(pos, cell_size);
        surface.draw_image(food, Rect::new(x, y, cell_size, cell_size));
    }
}

fn to_pixels(pos: Cell, cell_size: u32) -> (i32, i32) {
    (pos.0 * cell_size as i32, pos.1 * cell_size as i32)
}

fn cell_gradient(pos: Cell, cell_size: u32, colors: (Color, Color)) -> Fill {
    let c = cell_size as i32;
    let start = to_pixels(pos, cell_size);
    let end = (start.0 + c, start.1 + c);

    Fill::Gradient(LinearGradient {
        start: (start.0 as f32, start.1 as f32),
        end: (end.0 as f32, end.1 as f32),
        from: colors.0,
        to: colors.1,
    })
}

fn segment_rect(pos: Cell, cell_size: u32) -> Rect {
    let (x, y) = to_pixels(pos, cell_size);
    let side = cell_size.saturating_sub(SEGMENT_GAP);
    Rect::new(x, y, side, side)
}

fn draw_segment<S: Surface>(surface: &mut S, pos: Cell, cell_size: u32) {
    let radius = cell_size as f32 * 0.2;
    let fill = cell_gradient(pos, cell_size, BODY_COLORS);
    surface.fill_round_rect(segment_rect(pos, cell_size), CornerRadii::uniform(radius), &fill);
}

fn draw_head<S: Surface>(surface: &mut S, pos: Cell, direction: Direction, cell_size: u32) {
    let c = cell_size as f32;
    let radii = CornerRadii::new(c * 0.4, c * 0.4, c * 0.2, c * 0.2);
    let fill = cell_gradient(pos, cell_size, HEAD_COLORS);
    surface.fill_round_rect(segment_rect(pos, cell_size), radii, &fill);

    let eye = Fill::Solid(EYE_COLOR);
    for (x, y) in eye_positions(pos, direction, cell_size) {
        surface.fill_rect(Rect::new(x, y, EYE_SIZE, EYE_SIZE), &eye);
    }
}

/// Top-left pixel of both eyes, placed on the side of the head facing `direction`.
pub fn eye_positions(pos: Cell, direction: Direction, cell_size: u32) -> [(i32, i32); 2] {
    let c = cell_size as i32;
    let (x, y) = to_pixels(pos, cell_size);
    let far = c - EYE_FAR_MARGIN;
    let other_side = c - EYE_INSET - EYE_SIZE as i32;

    match direction {
        Left | Right => {
            let ex = x + if direction == Right { far } else { EYE_NEAR };
            [(ex, y + EYE_INSET), (ex, y + other_side)]
        },
        Up | Down => {
            let ey = y + if direction == Down { far } else { EYE_NEAR };
            [(x + EYE_INSET, ey), (x + other_side, ey)]
        },
    }
}
