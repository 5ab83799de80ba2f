/// UI rendering: status bar and help overlay
use crate::config::{Action, HelpOverlayStyle, KeybindingsConfig, StatusBarStyle, StatusPosition};
use crate::input::InputState;

// ============================================================================
// UI Layout Constants (not configurable)
// ============================================================================

/// Background rectangle X offset
const STATUS_BG_OFFSET_X: f64 = 5.0;
/// Background rectangle Y offset
const STATUS_BG_OFFSET_Y: f64 = 3.0;
/// Background rectangle width padding
const STATUS_BG_WIDTH_PAD: f64 = 10.0;
/// Background rectangle height padding
const STATUS_BG_HEIGHT_PAD: f64 = 8.0;
/// Gap between the color dot and the text
const STATUS_DOT_GAP: f64 = 8.0;

/// Text shown in the status bar: status label, brush size and help hint.
pub fn status_text(input_state: &InputState) -> String {
    format!(
        "{}  [{}px]  F10=Help",
        input_state.status_label(),
        input_state.brush().size_label()
    )
}

fn pango_layout(ctx: &cairo::Context, font: &str, size: f64, text: &str) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&format!("{font} {size}"));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    layout
}

fn layout_size(layout: &pango::Layout) -> (f64, f64) {
    let (_ink, logical) = layout.extents();
    let scale = pango::SCALE as f64;
    (
        logical.width() as f64 / scale,
        logical.height() as f64 / scale,
    )
}

/// Render status bar showing the status label, brush color and size
pub fn render_status_bar(
    ctx: &cairo::Context,
    input_state: &InputState,
    position: StatusPosition,
    style: &StatusBarStyle,
    screen_width: u32,
    screen_height: u32,
) {
    let text = status_text(input_state);
    let layout = pango_layout(ctx, "Sans Bold", style.font_size * 0.75, &text);
    let (text_width, text_height) = layout_size(&layout);
    log::trace!("Status bar text {text:?} measures {text_width:.0}x{text_height:.0}");

    let dot_space = style.dot_radius * 2.0 + STATUS_DOT_GAP;
    let total_width = dot_space + text_width;

    // (x, y) is the top-left corner of the content
    let padding = style.padding;
    let (x, y) = match position {
        StatusPosition::TopLeft => (padding, padding),
        StatusPosition::TopRight => (screen_width as f64 - total_width - padding, padding),
        StatusPosition::BottomLeft => (padding, screen_height as f64 - text_height - padding),
        StatusPosition::BottomRight => (
            screen_width as f64 - total_width - padding,
            screen_height as f64 - text_height - padding,
        ),
    };

    let [r, g, b, a] = style.bg_color;
    ctx.set_source_rgba(r, g, b, a);
    ctx.rectangle(
        x - STATUS_BG_OFFSET_X,
        y - STATUS_BG_OFFSET_Y,
        total_width + STATUS_BG_WIDTH_PAD,
        text_height + STATUS_BG_HEIGHT_PAD,
    );
    let _ = ctx.fill();

    // Color indicator dot shows what the next stroke will paint with
    let color = input_state
        .brush()
        .current_color(input_state.background());
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.arc(
        x + style.dot_radius,
        y + text_height / 2.0,
        style.dot_radius,
        0.0,
        2.0 * std::f64::consts::PI,
    );
    let _ = ctx.fill();

    let [r, g, b, a] = style.text_color;
    ctx.set_source_rgba(r, g, b, a);
    ctx.move_to(x + dot_space, y);
    pangocairo::functions::show_layout(ctx, &layout);
}

/// Lines of the help overlay, using the first configured key of each action.
pub fn help_lines(keybindings: &KeybindingsConfig) -> Vec<String> {
    let key = |action: Action| keybindings.label_for(action).unwrap_or("-").to_string();
    let row = |label: &str, action: Action| format!("  {:<16}{}", key(action), label);

    let mut lines = vec!["PAINTBOARD CONTROLS".to_string(), String::new()];
    lines.push("  Drag            Paint".to_string());
    lines.push("  Scroll          Brush size".to_string());
    lines.push(row("Brush", Action::SwitchToBrush));
    lines.push(row("Eraser", Action::SwitchToEraser));
    lines.push(row("Bigger brush", Action::IncreaseBrushSize));
    lines.push(row("Smaller brush", Action::DecreaseBrushSize));
    lines.push(String::new());

    let colors = [
        Action::SetColorRed,
        Action::SetColorGreen,
        Action::SetColorBlue,
        Action::SetColorYellow,
        Action::SetColorOrange,
        Action::SetColorPink,
        Action::SetColorWhite,
        Action::SetColorBlack,
        Action::SetColorPurple,
    ];
    let color_keys: Vec<String> = colors.into_iter().map(|action| key(action)).collect();
    lines.push(format!("  Colors          {}", color_keys.join(" ")));

    let backgrounds = [
        Action::SetBackgroundWhite,
        Action::SetBackgroundBlack,
        Action::SetBackgroundYellow,
        Action::SetBackgroundBlue,
    ];
    let background_keys: Vec<String> = backgrounds.into_iter().map(|action| key(action)).collect();
    lines.push(format!("  Backgrounds     {}", background_keys.join(" ")));
    lines.push(String::new());

    lines.push(row("Clear canvas", Action::ClearCanvas));
    lines.push(row("Save canvas", Action::SaveCanvas));
    lines.push(row("Load canvas", Action::LoadCanvas));
    lines.push(row("Clear storage", Action::ClearStorage));
    lines.push(row("Export image", Action::ExportImage));
    lines.push(String::new());
    lines.push(row("Toggle help", Action::ToggleHelp));
    lines.push(row("Toggle status bar", Action::ToggleStatusBar));
    lines.push(row("Exit", Action::Exit));
    lines
}

/// Render help overlay showing all keybindings
pub fn render_help_overlay(
    ctx: &cairo::Context,
    style: &HelpOverlayStyle,
    keybindings: &KeybindingsConfig,
    screen_width: u32,
    screen_height: u32,
) {
    let lines = help_lines(keybindings);
    let layouts: Vec<pango::Layout> = lines
        .iter()
        .map(|line| pango_layout(ctx, "Monospace", style.font_size * 0.75, line))
        .collect();

    let max_width = layouts
        .iter()
        .map(|layout| layout_size(layout).0)
        .fold(0.0, f64::max);

    let box_width = max_width + style.padding * 2.0;
    let box_height = (lines.len() as f64) * style.line_height + style.padding * 2.0;

    // Center the box
    let box_x = (screen_width as f64 - box_width) / 2.0;
    let box_y = (screen_height as f64 - box_height) / 2.0;

    let [r, g, b, a] = style.bg_color;
    ctx.set_source_rgba(r, g, b, a);
    ctx.rectangle(box_x, box_y, box_width, box_height);
    let _ = ctx.fill();

    let [r, g, b, a] = style.border_color;
    ctx.set_source_rgba(r, g, b, a);
    ctx.set_line_width(style.border_width);
    ctx.rectangle(box_x, box_y, box_width, box_height);
    let _ = ctx.stroke();

    let [r, g, b, a] = style.text_color;
    ctx.set_source_rgba(r, g, b, a);
    for (i, layout) in layouts.iter().enumerate() {
        ctx.move_to(
            box_x + style.padding,
            box_y + style.padding + i as f64 * style.line_height,
        );
        pangocairo::functions::show_layout(ctx, layout);
    }
}
