/// Terminal host for the trilingual geometry viewer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use kukan_core::cards::CARD_COUNT;
use kukan_core::config::ViewerConfig;
use kukan_core::label::{FontMetrics, GlyphFontMetrics, HeuristicFontMetrics};
use kukan_core::loader::FsModelSource;
use kukan_core::nav::Section;
use kukan_core::registry::{FontFamily, VIEWPORT_COUNT};
use kukan_core::viewer::Viewer;
use log::debug;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Assumed pixel size of one terminal cell. Feeds the per-viewport aspect
/// ratios and the responsive edge-thickness breakpoint, which are both
/// defined in pixels.
const CELL_PX_W: f32 = 8.0;
const CELL_PX_H: f32 = 16.0;

const HEADER_ROWS: u16 = 1;
const CARD_FIRST_ROW: u16 = 3;
const CARD_STRIDE: u16 = 4;

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    viewer: Viewer,
    models: FsModelSource,
    fonts: Box<dyn FontMetrics>,
    renderers: Vec<AsciiRenderer>,
    cols: u16,
    rows: u16,
    hovered_card: Option<usize>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let models = FsModelSource::new(config.asset_root());
        let fonts = load_fonts(&config);
        let viewer = Viewer::new(config, cols as f32 * CELL_PX_W, rows as f32 * CELL_PX_H);
        let renderers = viewport_rects(cols, rows)
            .iter()
            .map(|rect| AsciiRenderer::new(rect.2 as usize, rect.3 as usize))
            .collect();

        Ok(Self {
            viewer,
            models,
            fonts,
            renderers,
            cols,
            rows,
            hovered_card: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            terminal::LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let frame_ms = (1000 / self.viewer.config().target_fps()).max(1);
        let target_frame_time = Duration::from_millis(frame_ms as u64);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.dispatch(event::read()?);
            }

            // Update
            self.viewer.pump(&self.models, self.fonts.as_ref());
            self.viewer.advance_frame(frame_ms);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved,
                column,
                row,
                ..
            }) => self.handle_mouse(column, row),
            Event::Resize(cols, rows) => self.handle_resize(cols, rows),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Esc => {
                if self.viewer.nav().menu_open() {
                    self.viewer.close_menu();
                } else {
                    self.running = false;
                }
            }
            KeyCode::Char('m') => {
                self.viewer.cycle_mode();
                debug!("mode -> {:?}", self.viewer.state().mode);
            }
            KeyCode::Char('t') => {
                self.viewer.cycle_theme();
                debug!("theme -> {:?}", self.viewer.state().theme);
            }
            KeyCode::Char('u') => {
                self.viewer.toggle_units();
            }
            KeyCode::Tab => {
                self.viewer.toggle_menu();
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.navigate(Section::ORDER[c as usize - '1' as usize]);
            }
            KeyCode::Char('c') => self.cycle_card_hover(),
            _ => {}
        }
    }

    fn navigate(&mut self, section: Section) {
        self.viewer.navigate(section);
        self.apply_viewport_sizes();
    }

    fn apply_viewport_sizes(&mut self) {
        for (slot, rect) in viewport_rects(self.cols, self.rows).iter().enumerate() {
            self.viewer.resize_viewport(
                slot,
                rect.2 as f32 * CELL_PX_W,
                rect.3 as f32 * CELL_PX_H,
            );
        }
    }

    /// Keyboard stand-in for pointer hover over the fact cards.
    fn cycle_card_hover(&mut self) {
        let next = match self.hovered_card {
            None => Some(0),
            Some(i) if i + 1 < CARD_COUNT => Some(i + 1),
            Some(_) => None,
        };
        if let Some(old) = self.hovered_card {
            self.viewer.unhover_card(old);
        }
        if let Some(new) = next {
            self.viewer.hover_card(new);
        }
        self.hovered_card = next;
    }

    fn handle_mouse(&mut self, column: u16, row: u16) {
        match self.viewer.section() {
            Section::Geometry => {
                for (slot, rect) in viewport_rects(self.cols, self.rows).iter().enumerate() {
                    let (x, y, w, h) = *rect;
                    if column >= x && column < x + w && row >= y && row < y + h && w > 0 && h > 0 {
                        let nx = (column - x) as f32 / w as f32 * 2.0 - 1.0;
                        let ny = -((row - y) as f32 / h as f32 * 2.0 - 1.0);
                        self.viewer.pointer_moved(slot, nx, ny);
                        return;
                    }
                }
            }
            Section::Physics => {
                let target = card_at_row(row);
                if target != self.hovered_card {
                    if let Some(old) = self.hovered_card {
                        self.viewer.unhover_card(old);
                    }
                    if let Some(new) = target {
                        self.viewer.hover_card(new);
                    }
                    self.hovered_card = target;
                }
            }
            Section::Welcome => {}
        }
    }

    fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let rects = viewport_rects(cols, rows);
        for (renderer, rect) in self.renderers.iter_mut().zip(rects.iter()) {
            renderer.resize(rect.2 as usize, rect.3 as usize);
        }
        self.viewer
            .resize_host(cols as f32 * CELL_PX_W, rows as f32 * CELL_PX_H);
        self.apply_viewport_sizes();
    }

    fn render(&mut self) -> io::Result<()> {
        let mut out = stdout();
        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        let palette = self.viewer.state().theme.colors();
        let accent = rgb(palette.accent.rgb8());
        let light = rgb(palette.light.rgb8());

        // Header line
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(accent),
            Print(format!(
                " {}  kukan | fps {:>4.1} | m=mode t=theme u=units 1-3=section tab=menu c=card q=quit",
                self.viewer.mode_button_glyph(),
                self.fps
            )),
            ResetColor
        )?;

        match self.viewer.section() {
            Section::Welcome => self.render_welcome(&mut out, light, accent)?,
            Section::Geometry => self.render_geometry(&mut out)?,
            Section::Physics => self.render_physics(&mut out, light, accent)?,
        }

        if self.viewer.nav().menu_open() {
            self.render_menu(&mut out, accent)?;
        }

        out.flush()?;
        Ok(())
    }

    fn render_welcome<W: Write>(&self, out: &mut W, light: Color, accent: Color) -> io::Result<()> {
        let welcome = self.viewer.welcome();
        let row = self.rows / 3;
        let col = centered(self.cols, welcome.text.chars().count());
        queue!(
            out,
            cursor::MoveTo(col, row),
            SetForegroundColor(light),
            Print(welcome.text),
            ResetColor
        )?;
        let hint = "2: geometry   3: physics";
        queue!(
            out,
            cursor::MoveTo(centered(self.cols, hint.len()), row + 2),
            SetForegroundColor(accent),
            Print(hint),
            ResetColor
        )?;
        Ok(())
    }

    fn render_geometry<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let rects = viewport_rects(self.cols, self.rows);
        for (slot, rect) in rects.iter().enumerate() {
            let renderer = &mut self.renderers[slot];
            if renderer.size() != (rect.2 as usize, rect.3 as usize) {
                renderer.resize(rect.2 as usize, rect.3 as usize);
            }
            if let Some(vp) = self.viewer.sync().viewport(slot) {
                renderer.clear();
                renderer.render_scene(&vp.scene, &vp.rig.camera);
                renderer.draw_region(out, rect.0, rect.1, vp.scene.background.rgb8())?;
            }
        }
        Ok(())
    }

    fn render_physics<W: Write>(&self, out: &mut W, light: Color, accent: Color) -> io::Result<()> {
        for index in 0..CARD_COUNT {
            let face = self.viewer.card_face(index);
            let top = CARD_FIRST_ROW + index as u16 * CARD_STRIDE;
            let hovered = self.hovered_card == Some(index);
            let fg = if hovered { accent } else { light };
            let marker = if hovered { ">" } else { " " };
            queue!(
                out,
                cursor::MoveTo(4, top),
                SetForegroundColor(fg),
                Print(format!("{marker} {}", face.text)),
                cursor::MoveTo(6, top + 1),
                Print(face.value),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn render_menu<W: Write>(&self, out: &mut W, accent: Color) -> io::Result<()> {
        let labels = self.viewer.menu_labels();
        let palette = self.viewer.state().theme.colors();
        let bg = rgb(palette.dark.rgb8());
        for (i, text) in [labels.welcome, labels.geometry, labels.physics]
            .iter()
            .enumerate()
        {
            queue!(
                out,
                cursor::MoveTo(2, HEADER_ROWS + 1 + i as u16),
                SetBackgroundColor(bg),
                SetForegroundColor(accent),
                Print(format!(" {} {} ", i + 1, text)),
                ResetColor
            )?;
        }
        Ok(())
    }
}

/// Real font metrics when both shipped faces load, heuristic measurement
/// otherwise.
fn load_fonts(config: &ViewerConfig) -> Box<dyn FontMetrics> {
    let dir = config.asset_root().join("fonts");
    let mut metrics = GlyphFontMetrics::new();
    let results = [
        metrics.load_file(FontFamily::Latin, &dir.join("Inter-Regular.ttf")),
        metrics.load_file(FontFamily::Cjk, &dir.join("NotoSansJP-Regular.ttf")),
    ];
    if results.iter().all(|result| result.is_ok()) {
        return Box::new(metrics);
    }
    for err in results.into_iter().filter_map(Result::err) {
        debug!("font unavailable: {err}");
    }
    Box::new(HeuristicFontMetrics)
}

fn rgb(channels: (u8, u8, u8)) -> Color {
    Color::Rgb {
        r: channels.0,
        g: channels.1,
        b: channels.2,
    }
}

fn centered(cols: u16, text_len: usize) -> u16 {
    (cols.saturating_sub(text_len as u16)) / 2
}

/// Cell rectangles (x, y, w, h) of the three viewports: an even
/// three-column split under the header row.
fn viewport_rects(cols: u16, rows: u16) -> [(u16, u16, u16, u16); VIEWPORT_COUNT] {
    let w = (cols / VIEWPORT_COUNT as u16).max(1);
    let h = rows.saturating_sub(HEADER_ROWS).max(1);
    let mut rects = [(0, HEADER_ROWS, w, h); VIEWPORT_COUNT];
    for (slot, rect) in rects.iter_mut().enumerate() {
        rect.0 = slot as u16 * w;
    }
    rects
}

/// Map a terminal row to the fact card drawn there, if any.
fn card_at_row(row: u16) -> Option<usize> {
    for index in 0..CARD_COUNT {
        let top = CARD_FIRST_ROW + index as u16 * CARD_STRIDE;
        if row >= top && row < top + 2 {
            return Some(index);
        }
    }
    None
}
