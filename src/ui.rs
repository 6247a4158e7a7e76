use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Map, MapResolution, Points},
        Paragraph,
    },
    Frame,
};

use crate::app::{App, Button};
use crate::config::MapDetail;
use crate::controller::Mode;
use crate::palette::Border;
use crate::shapes::{Shape, ShapeKind};
use crate::toolkit::MapToolkit;

/// Screen regions, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub map: Rect,
    pub buttons: Rect,
    pub status: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Map
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    ScreenLayout {
        map: chunks[0],
        buttons: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}

/// Button labels in bar order
pub fn button_labels(app: &App) -> Vec<(Button, String)> {
    let mut buttons = vec![
        (Button::Submit, format!(" {} ", app.controller.label())),
        (Button::Reset, " Reset ".to_string()),
        (Button::Delete, " Delete ".to_string()),
    ];
    for (i, swatch) in app.controller.palette().iter().enumerate() {
        let label = match swatch.border {
            Border::Highlighted => "[██]",
            Border::Plain => " ██ ",
        };
        buttons.push((Button::Palette(i), label.to_string()));
    }
    buttons
}

/// Button under a screen cell
pub fn button_at(app: &App, col: u16, row: u16) -> Option<Button> {
    let area = app.button_area;
    if row != area.y || col < area.x {
        return None;
    }
    let mut x = area.x;
    for (button, label) in button_labels(app) {
        let width = label.chars().count() as u16;
        if col >= x && col < x + width {
            return Some(button);
        }
        x += width + 1;
    }
    None
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let layout = screen_layout(frame.area());

    render_map(frame, app, layout.map);
    render_buttons(frame, app, layout.buttons);
    render_status_bar(frame, app, layout.status);
    render_help_bar(frame, app, layout.help);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let resolution = match app.map_detail {
        MapDetail::Low => MapResolution::Low,
        MapDetail::High => MapResolution::High,
    };

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds(app.view.x_bounds())
        .y_bounds(app.view.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution,
            });
            ctx.layer();

            for shape in app.scene().shapes() {
                draw_shape(ctx, shape);
            }
            draw_draft(ctx, app);
        });

    frame.render_widget(canvas, area);
}

fn draw_shape(ctx: &mut Context, shape: &Shape) {
    let color = shape
        .style
        .display_color()
        .map(|c| c.to_ratatui())
        .unwrap_or(Color::White);
    let path = &shape.path;

    match shape.kind {
        ShapeKind::Polygon | ShapeKind::Rectangle => {
            let outline = shape.outline();
            for (i, a) in outline.iter().enumerate() {
                let b = outline[(i + 1) % outline.len()];
                ctx.draw(&CanvasLine::new(a.lng, a.lat, b.lng, b.lat, color));
            }
        }
        ShapeKind::Polyline => {
            for seg in path.windows(2) {
                ctx.draw(&CanvasLine::new(seg[0].lng, seg[0].lat, seg[1].lng, seg[1].lat, color));
            }
        }
        ShapeKind::Circle => {
            if let [center, rim] = path.as_slice() {
                ctx.draw(&Circle {
                    x: center.lng,
                    y: center.lat,
                    radius: center.degree_distance(*rim),
                    color,
                });
            }
        }
        ShapeKind::Marker => {
            if let Some(pos) = path.first() {
                ctx.print(pos.lng, pos.lat, Span::styled("▼", Style::default().fg(color)));
            }
        }
    }

    if shape.style.editable && shape.kind != ShapeKind::Marker {
        for p in path {
            ctx.print(
                p.lng,
                p.lat,
                Span::styled("■", Style::default().fg(Color::White)),
            );
        }
    }
}

fn draw_draft(ctx: &mut Context, app: &App) {
    let draft = app.scene().draft();
    if draft.is_empty() {
        return;
    }
    for seg in draft.windows(2) {
        ctx.draw(&CanvasLine::new(
            seg[0].lng,
            seg[0].lat,
            seg[1].lng,
            seg[1].lat,
            Color::Yellow,
        ));
    }
    let coords: Vec<(f64, f64)> = draft.iter().map(|p| (p.lng, p.lat)).collect();
    ctx.draw(&Points {
        coords: &coords,
        color: Color::Yellow,
    });
}

fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let button_style = Style::default().fg(Color::Black).bg(Color::Gray);
    let palette = app.controller.palette();

    let mut spans = Vec::new();
    for (button, label) in button_labels(app) {
        let style = match button {
            Button::Submit => button_style.add_modifier(Modifier::BOLD),
            Button::Palette(i) => {
                let color = palette
                    .get(i)
                    .map(|b| b.color.to_ratatui())
                    .unwrap_or(Color::White);
                Style::default().fg(color)
            }
            Button::Reset | Button::Delete => button_style,
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (mode_name, mode_bg) = if app.scene().is_drawing() {
        ("DRAW", Color::Yellow)
    } else {
        match app.mode() {
            Mode::Create => ("NEW", Color::Blue),
            Mode::Edit => ("EDIT", Color::Green),
        }
    };

    let mode_style = Style::default()
        .fg(Color::Black)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let drawing = app
        .scene()
        .drawing_mode()
        .filter(|_| app.scene().is_drawing())
        .map(|kind| format!(" {kind}"))
        .unwrap_or_default();

    let color = app
        .controller
        .selected_color()
        .map(|c| format!(" {}", c.name()))
        .unwrap_or_default();

    let points = match app.controller.coordinates().len() {
        0 => String::new(),
        n => format!(" {n} pts"),
    };

    let status_text = app
        .status_message
        .as_ref()
        .map(|m| format!(" {}", m))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(format!(" {} ", mode_name), mode_style),
        Span::styled(drawing, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(color),
        Span::raw(points),
        Span::styled(
            format!(" z{} {}", app.view.zoom, app.view.center),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(status_text, Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help = if app.scene().is_drawing() {
        " click:vertex  Enter:finish  Esc:cancel  p/l/m/b/c:kind  +/-:zoom  arrows:pan  q:quit"
    } else {
        " s:submit  r:reset  d:delete  i:insert  1-5:color  p/l/m/b/c:draw  +/-:zoom  arrows:pan  q:quit"
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
