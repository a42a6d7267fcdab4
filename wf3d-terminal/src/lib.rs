//! Terminal frame host for the wireframe orbit viewer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton as TermButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{
    GridScene, InputEvent, MouseButton, OrbitViewer, PixelSurface, Scene, SceneRegistry,
    SurfaceCanvas, ViewerConfig,
};

pub mod renderer;

pub use renderer::BlockRenderer;
use renderer::pixel_rows;

/// Handle of a scene drawn into the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u32);

const MAIN_WINDOW: WindowId = WindowId(0);

fn button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Right => MouseButton::Right,
        TermButton::Middle => MouseButton::Middle,
    }
}

/// Translate a terminal event into surface input.
///
/// Each character cell covers one pixel column and two pixel rows, so the mouse
/// row is doubled.
pub fn translate_event(event: &Event) -> Option<InputEvent> {
    match *event {
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let (x, y) = (f32::from(column), f32::from(row) * 2.0);
            match kind {
                MouseEventKind::Down(b) => Some(InputEvent::MouseDown { button: button(b), x, y }),
                MouseEventKind::Up(b) => Some(InputEvent::MouseUp { button: button(b), x, y }),
                MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                    Some(InputEvent::MouseMove { x, y })
                }
                MouseEventKind::ScrollUp => Some(InputEvent::WheelUp),
                MouseEventKind::ScrollDown => Some(InputEvent::WheelDown),
                _ => None,
            }
        }
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            kind,
            ..
        }) => match kind {
            KeyEventKind::Release => Some(InputEvent::KeyUp(c)),
            _ => Some(InputEvent::KeyDown(c)),
        },
        Event::Resize(cols, rows) => Some(InputEvent::Resize {
            width: u32::from(cols),
            height: pixel_rows(rows),
        }),
        _ => None,
    }
}

/// `q`, Esc or Ctrl-C
pub fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            matches!(code, KeyCode::Char('q') | KeyCode::Esc)
                || (*code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => false,
    }
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    scenes: SceneRegistry<WindowId, Box<dyn Scene>>,
    canvas: SurfaceCanvas,
    renderer: BlockRenderer,
    frame_time: Duration,
    running: bool,
    last_tick: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(config, u32::from(cols), pixel_rows(rows)))
    }

    /// App drawing into a `width` x `height` pixel surface
    pub fn with_size(config: ViewerConfig, width: u32, height: u32) -> Self {
        let viewer = OrbitViewer::new(&config, width, height, GridScene::new(config.scene.clone()));
        let mut scenes: SceneRegistry<WindowId, Box<dyn Scene>> = SceneRegistry::new();
        scenes.register(MAIN_WINDOW, Box::new(viewer));

        let fps = config.frame_rate.max(1);
        info!("terminal surface {width}x{height}, {fps} fps");

        Self {
            scenes,
            canvas: SurfaceCanvas::new(PixelSurface::new(width, height)),
            renderer: BlockRenderer::new(),
            frame_time: Duration::from_millis(1000 / u64::from(fps)),
            running: true,
            last_tick: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn canvas(&self) -> &SurfaceCanvas {
        &self.canvas
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(&event);
            }

            let dt = self.last_tick.elapsed().as_secs_f32();
            self.last_tick = Instant::now();
            self.scenes.tick_all(dt);

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
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

    /// Apply one terminal event: quit keys stop the loop, the rest go to the scene.
    pub fn handle_event(&mut self, event: &Event) {
        if is_quit(event) {
            self.running = false;
            return;
        }

        let Some(input) = translate_event(event) else {
            return;
        };

        if let InputEvent::Resize { width, height } = input {
            debug!("resizing surface to {width}x{height}");
            self.canvas = SurfaceCanvas::new(PixelSurface::new(width, height));
        }
        self.scenes.dispatch(&MAIN_WINDOW, &input);
    }

    /// Draw every scene into the pixel surface
    pub fn draw_scenes(&mut self) {
        for (_, scene) in self.scenes.iter_mut() {
            scene.draw(&mut self.canvas);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.draw_scenes();

        let mut stdout = stdout();
        self.renderer.draw(self.canvas.surface(), &mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D | FPS: {:.1} | drag=pan  right+drag=orbit  wheel/+/-=zoom  r=reset  q=quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_mouse_rows_are_doubled() {
        assert_eq!(
            translate_event(&mouse(MouseEventKind::Down(TermButton::Left), 4, 3)),
            Some(InputEvent::MouseDown {
                button: MouseButton::Left,
                x: 4.0,
                y: 6.0
            })
        );
        assert_eq!(
            translate_event(&mouse(MouseEventKind::Drag(TermButton::Right), 10, 1)),
            Some(InputEvent::MouseMove { x: 10.0, y: 2.0 })
        );
        assert_eq!(
            translate_event(&mouse(MouseEventKind::Up(TermButton::Right), 0, 0)),
            Some(InputEvent::MouseUp {
                button: MouseButton::Right,
                x: 0.0,
                y: 0.0
            })
        );
    }

    #[test]
    fn test_scroll_and_keys() {
        assert_eq!(
            translate_event(&mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(InputEvent::WheelUp)
        );
        assert_eq!(
            translate_event(&mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(InputEvent::WheelDown)
        );
        assert_eq!(translate_event(&key('r')), Some(InputEvent::KeyDown('r')));
        assert_eq!(
            translate_event(&Event::Key(KeyEvent::new_with_kind(
                KeyCode::Char('r'),
                KeyModifiers::NONE,
                KeyEventKind::Release
            ))),
            Some(InputEvent::KeyUp('r'))
        );
        assert_eq!(translate_event(&Event::FocusGained), None);
    }

    #[test]
    fn test_resize_reports_pixels() {
        assert_eq!(
            translate_event(&Event::Resize(80, 24)),
            Some(InputEvent::Resize {
                width: 80,
                height: 48
            })
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key('q')));
        assert!(is_quit(&Event::Key(KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE
        ))));
        assert!(is_quit(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        ))));
        assert!(!is_quit(&key('c')));
    }

    #[test]
    fn test_app_draws_and_resizes() {
        let mut app = TerminalApp::with_size(ViewerConfig::default(), 40, 20);
        app.draw_scenes();
        let background = app
            .canvas()
            .surface()
            .as_bytes()
            .chunks_exact(3)
            .filter(|px| *px == [0xAA, 0xAA, 0xAA])
            .count();
        assert!(background > 40 * 20 / 2);

        app.handle_event(&Event::Resize(30, 5));
        assert_eq!(app.canvas().surface().width(), 30);
        assert_eq!(app.canvas().surface().height(), 10);
        assert!(app.is_running());

        app.handle_event(&key('q'));
        assert!(!app.is_running());
    }
}
