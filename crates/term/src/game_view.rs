//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O). Face-down tiles are drawn from `TileView` alone, which never
//! carries their symbol, so the view cannot leak the layout.

use crate::core::{GameSnapshot, TileView, TurnPhase};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::GRID_COLUMNS;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BG: Rgb = Rgb::new(0, 0, 0);
const FELT: Rgb = Rgb::new(24, 36, 48);

const FRAME: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BG);
const FACE_DOWN: CellStyle = CellStyle::new(Rgb::new(90, 110, 140), FELT);
const FACE_DOWN_EDGE: CellStyle = CellStyle::new(Rgb::new(120, 140, 170), FELT);
const REVEALED: CellStyle = CellStyle::new(Rgb::new(255, 230, 120), FELT).bold();
const MATCHED: CellStyle = CellStyle::new(Rgb::new(110, 210, 130), FELT);
const MATCHED_EDGE: CellStyle = CellStyle::new(Rgb::new(70, 140, 90), FELT).dim();
const CURSOR_EDGE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), FELT).bold();
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BG);
const HINT: CellStyle = CellStyle::new(Rgb::new(140, 140, 140), BG).dim();
const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 110, 60)).bold();

/// Board and stats renderer for the memory game.
pub struct GameView {
    /// Tile width in terminal columns, borders included.
    tile_w: u16,
    /// Tile height in terminal rows, borders included.
    tile_h: u16,
    columns: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            tile_w: 5,
            tile_h: 3,
            columns: GRID_COLUMNS,
        }
    }
}

impl GameView {
    /// Render the snapshot into an existing framebuffer.
    ///
    /// `cursor` is a board position (index into `snap.tiles`), not a tile id.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', FRAME));

        let frame = self.frame_rect(snap.tiles.len(), viewport);
        fb.fill_rect(
            Rect::new(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2),
            ' ',
            CellStyle::new(FELT, FELT),
        );
        fb.draw_box(frame, FRAME);

        for (pos, tile) in snap.tiles.iter().enumerate() {
            let rect = self.tile_rect(frame, pos);
            self.draw_tile(fb, rect, tile, cursor == Some(pos));
        }

        self.draw_side_panel(fb, snap, viewport, frame);
        self.draw_key_hints(fb, frame);

        if snap.won {
            let text = format!(
                " YOU WON in {} moves, {} ",
                snap.move_count,
                snap.elapsed_display()
            );
            let mid = frame.y + frame.h / 2;
            fb.put_str_centered(frame.x, mid, frame.w, &text, BANNER);
            fb.put_str_centered(frame.x, mid + 1, frame.w, " press n to play again ", BANNER);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<usize>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn rows(&self, tile_count: usize) -> u16 {
        let cols = self.columns.max(1) as usize;
        (tile_count.div_ceil(cols)).max(1) as u16
    }

    /// Outer frame of the board, centered horizontally with room for the panel.
    fn frame_rect(&self, tile_count: usize, viewport: Viewport) -> Rect {
        let cols = self.columns.max(1);
        let w = cols * self.tile_w + (cols - 1) + 4;
        let h = self.rows(tile_count) * self.tile_h + 2;
        let panel_w = 18;
        let x = viewport.width.saturating_sub(w + panel_w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;
        Rect::new(x, y, w, h)
    }

    fn tile_rect(&self, frame: Rect, pos: usize) -> Rect {
        let cols = self.columns.max(1) as usize;
        let col = (pos % cols) as u16;
        let row = (pos / cols) as u16;
        Rect::new(
            frame.x + 2 + col * (self.tile_w + 1),
            frame.y + 1 + row * self.tile_h,
            self.tile_w,
            self.tile_h,
        )
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, rect: Rect, tile: &TileView, focused: bool) {
        let (face, edge) = match (tile.matched, tile.revealed) {
            (true, _) => (MATCHED, MATCHED_EDGE),
            (false, true) => (REVEALED, FACE_DOWN_EDGE),
            (false, false) => (FACE_DOWN, FACE_DOWN_EDGE),
        };
        let edge = if focused { CURSOR_EDGE } else { edge };

        let inner = Rect::new(rect.x + 1, rect.y + 1, rect.w - 2, rect.h - 2);
        let fill = if tile.revealed { ' ' } else { '░' };
        fb.fill_rect(inner, fill, face);
        fb.draw_box(rect, edge);

        if let Some(symbol) = tile.symbol {
            fb.put_char(rect.x + rect.w / 2, rect.y + rect.h / 2, symbol, face);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Rect) {
        let x = frame.right().saturating_add(2);
        if x >= viewport.width || viewport.width - x < 10 {
            return;
        }

        let stats = [
            ("SCORE", snap.score.to_string()),
            ("BEST", snap.best_score.to_string()),
            ("MOVES", snap.move_count.to_string()),
            ("TIME", snap.elapsed_display()),
            ("TOTAL MOVES", snap.total_move_count.to_string()),
        ];

        let mut y = frame.y;
        for (label, value) in stats.iter() {
            fb.put_str(x, y, label, LABEL);
            fb.put_str(x, y.saturating_add(1), value, VALUE);
            y = y.saturating_add(2);
        }

        let status = match (snap.won, snap.phase) {
            (true, _) => "solved",
            (false, TurnPhase::Resolving) => "checking...",
            (false, TurnPhase::OneSelected) => "pick a match",
            (false, TurnPhase::Idle) => "pick a tile",
        };
        fb.put_str(x, y, status, VALUE);
    }

    fn draw_key_hints(&self, fb: &mut FrameBuffer, frame: Rect) {
        fb.put_str(
            frame.x,
            frame.bottom(),
            "arrows/hjkl move  enter flip  n new  q quit",
            HINT,
        );
    }
}
