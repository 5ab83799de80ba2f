use cairo::{Context, ImageSurface};
use paintboard::config::{HelpOverlayStyle, KeybindingsConfig, StatusBarStyle, StatusPosition};
use paintboard::input::InputState;

fn make_input_state() -> InputState {
    InputState::in_memory(400, 200).unwrap()
}

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

fn surface_has_pixels(surface: &mut ImageSurface) -> bool {
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

#[test]
fn render_status_bar_draws_for_all_positions() {
    let input = make_input_state();
    let style = StatusBarStyle::default();
    let positions = [
        StatusPosition::TopLeft,
        StatusPosition::TopRight,
        StatusPosition::BottomLeft,
        StatusPosition::BottomRight,
    ];

    for position in positions {
        let (mut surface, ctx) = surface_with_context(400, 200);
        paintboard::ui::render_status_bar(&ctx, &input, position, &style, 400, 200);
        drop(ctx);
        assert!(
            surface_has_pixels(&mut surface),
            "status bar should render pixels for {:?}",
            position
        );
    }
}

#[test]
fn status_text_follows_tool_and_messages() {
    let mut input = make_input_state();
    assert_eq!(paintboard::ui::status_text(&input), "Brush  [10px]  F10=Help");

    input.switch_to_eraser();
    assert_eq!(paintboard::ui::status_text(&input), "Eraser  [50px]  F10=Help");

    input.switch_to_brush();
    input.set_brush_size(5.0);
    input.load_canvas();
    assert_eq!(
        paintboard::ui::status_text(&input),
        "No Canvas Found  [05px]  F10=Help"
    );
}

#[test]
fn render_help_overlay_draws_content() {
    let style = HelpOverlayStyle::default();
    let keybindings = KeybindingsConfig::default();
    let (mut surface, ctx) = surface_with_context(800, 600);
    paintboard::ui::render_help_overlay(&ctx, &style, &keybindings, 800, 600);
    drop(ctx);
    assert!(surface_has_pixels(&mut surface));
}

#[test]
fn help_lines_use_configured_keys() {
    let mut keybindings = KeybindingsConfig::default();
    keybindings.export_image = vec!["Ctrl+Shift+E".to_string()];
    let lines = paintboard::ui::help_lines(&keybindings);

    let has = |key: &str, label: &str| {
        lines
            .iter()
            .any(|line| line.contains(key) && line.contains(label))
    };

    assert!(has("Ctrl+Shift+E", "Export image"));
    assert!(has("Ctrl+S", "Save canvas"));
    assert!(has("  Colors", "R G B Y O P W K V"));
}
