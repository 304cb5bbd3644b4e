//! Rendering module
//!
//! Projects a world snapshot onto a character-grid `Display`. Coordinates are
//! (row, col) in court space: rows run along the court's width, columns along
//! its length.

pub mod terminal;

pub use terminal::TerminalDisplay;

use std::io;

use crate::digit_count;
use crate::sim::{Ball, Court, Glyph, Paddle, Snapshot};

/// Character-grid drawing surface
pub trait Display {
    /// Start a new frame
    fn clear(&mut self) -> io::Result<()>;
    fn draw_text(&mut self, row: i32, col: i32, text: &str) -> io::Result<()>;
    /// Frame the whole court
    fn draw_border(&mut self) -> io::Result<()>;
    /// Draw `length` copies of `glyph` downward from (row, col)
    fn draw_vertical_line(
        &mut self,
        row: i32,
        col: i32,
        glyph: Glyph,
        length: i32,
    ) -> io::Result<()>;
    fn draw_char(&mut self, row: i32, col: i32, glyph: Glyph) -> io::Result<()>;
    /// Show the finished frame
    fn present(&mut self) -> io::Result<()>;
}

/// Draw one complete frame
pub fn draw_frame(display: &mut impl Display, snapshot: &Snapshot) -> io::Result<()> {
    display.clear()?;
    draw_ball_speed(display, &snapshot.ball)?;
    draw_court(display, &snapshot.court)?;
    for paddle in &snapshot.paddles {
        draw_paddle(display, paddle)?;
    }
    draw_ball(display, &snapshot.ball)?;
    display.present()
}

fn draw_ball_speed(display: &mut impl Display, ball: &Ball) -> io::Result<()> {
    display.draw_text(1, 1, &format!("vx = {:.2}", ball.vel.x))?;
    display.draw_text(2, 1, &format!("vy = {:.2}", ball.vel.y))
}

fn draw_court(display: &mut impl Display, court: &Court) -> io::Result<()> {
    display.draw_border()?;
    display.draw_char(0, court.center_x, Glyph::TopTee)?;
    display.draw_vertical_line(1, court.center_x, Glyph::VerticalLine, court.width - 2)?;
    display.draw_char(court.width - 1, court.center_x, Glyph::BottomTee)?;
    draw_scores(display, court)
}

/// Left score ends just before the left padding; right score starts after the right one
fn draw_scores(display: &mut impl Display, court: &Court) -> io::Result<()> {
    let left_col = court.center_x - court.padding - digit_count(court.left_score);
    let right_col = court.center_x + court.padding;
    display.draw_text(court.padding, left_col, &court.left_score.to_string())?;
    display.draw_text(court.padding, right_col, &court.right_score.to_string())
}

fn draw_paddle(display: &mut impl Display, paddle: &Paddle) -> io::Result<()> {
    display.draw_vertical_line(paddle.top_y, paddle.x, Glyph::Checkerboard, paddle.size)
}

fn draw_ball(display: &mut impl Display, ball: &Ball) -> io::Result<()> {
    let (row, col) = ball.cell();
    display.draw_char(row, col, ball.glyph)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::Side;
    use glam::Vec2;
    use std::time::Instant;

    /// A draw call, as recorded by `RecordingDisplay`
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Text(i32, i32, String),
        Border,
        VerticalLine(i32, i32, Glyph, i32),
        Char(i32, i32, Glyph),
        Present,
    }

    #[derive(Debug, Default)]
    pub struct RecordingDisplay {
        pub calls: Vec<DrawCall>,
    }

    impl Display for RecordingDisplay {
        fn clear(&mut self) -> io::Result<()> {
            self.calls.push(DrawCall::Clear);
            Ok(())
        }
        fn draw_text(&mut self, row: i32, col: i32, text: &str) -> io::Result<()> {
            self.calls.push(DrawCall::Text(row, col, text.to_string()));
            Ok(())
        }
        fn draw_border(&mut self) -> io::Result<()> {
            self.calls.push(DrawCall::Border);
            Ok(())
        }
        fn draw_vertical_line(
            &mut self,
            row: i32,
            col: i32,
            glyph: Glyph,
            length: i32,
        ) -> io::Result<()> {
            self.calls.push(DrawCall::VerticalLine(row, col, glyph, length));
            Ok(())
        }
        fn draw_char(&mut self, row: i32, col: i32, glyph: Glyph) -> io::Result<()> {
            self.calls.push(DrawCall::Char(row, col, glyph));
            Ok(())
        }
        fn present(&mut self) -> io::Result<()> {
            self.calls.push(DrawCall::Present);
            Ok(())
        }
    }

    fn snapshot() -> Snapshot {
        let now = Instant::now();
        let mut court = Court::new(24, 80).unwrap();
        court.left_score = 12;
        court.right_score = 3;
        Snapshot {
            court,
            paddles: [Paddle::new(3, 12, 6, now), Paddle::new(76, 12, 6, now)],
            ball: Ball {
                pos: Vec2::new(41.7, 5.9),
                next: Vec2::new(42.7, 6.4),
                vel: Vec2::new(1.0, -0.5),
                glyph: Glyph::Diamond,
            },
        }
    }

    #[test]
    fn test_frame_draw_order() {
        let mut display = RecordingDisplay::default();
        draw_frame(&mut display, &snapshot()).unwrap();

        assert_eq!(
            display.calls,
            vec![
                DrawCall::Clear,
                DrawCall::Text(1, 1, "vx = 1.00".to_string()),
                DrawCall::Text(2, 1, "vy = -0.50".to_string()),
                DrawCall::Border,
                DrawCall::Char(0, 40, Glyph::TopTee),
                DrawCall::VerticalLine(1, 40, Glyph::VerticalLine, 22),
                DrawCall::Char(23, 40, Glyph::BottomTee),
                DrawCall::Text(3, 35, "12".to_string()),
                DrawCall::Text(3, 43, "3".to_string()),
                DrawCall::VerticalLine(9, 3, Glyph::Checkerboard, 6),
                DrawCall::VerticalLine(9, 76, Glyph::Checkerboard, 6),
                DrawCall::Char(5, 41, Glyph::Diamond),
                DrawCall::Present,
            ]
        );
    }

    #[test]
    fn test_zero_score_placement() {
        let mut snap = snapshot();
        snap.court.left_score = 0;
        let mut display = RecordingDisplay::default();
        draw_frame(&mut display, &snap).unwrap();
        assert!(
            display
                .calls
                .contains(&DrawCall::Text(3, 36, "0".to_string()))
        );
    }

    #[test]
    fn test_render_does_not_touch_world() {
        let now = Instant::now();
        let mut rng = <rand_pcg::Pcg32 as rand::SeedableRng>::seed_from_u64(5);
        let world = crate::sim::World::new(24, 80, now, &mut rng).unwrap();
        let before = world.snapshot();

        let mut display = RecordingDisplay::default();
        draw_frame(&mut display, &world.snapshot()).unwrap();

        let after = world.snapshot();
        assert_eq!(before.ball, after.ball);
        assert_eq!(before.court, after.court);
        assert_eq!(before.paddles[Side::Left.index()], after.paddles[0]);
    }
}
