use statcard_core::{MinecraftColor, Rgb, prestige_markup, strip_markup};
use statcard_render::{
    Alignment, ContentBox, DrawCursor, RecordingSurface, Shape, Surface, SvgSurface, TextEntry,
    draw_gradient, draw_markup, title,
};

#[test]
fn full_card_serializes_to_svg() {
    let mut surface = SvgSurface::new(500.0, 500.0).with_background(Rgb::new(20, 20, 20));

    title::draw_title(&mut surface, 500.0, "<gold>Herobrine's BedWars Stats</gold>");

    let stats = ContentBox::new(10.0, 60.0, 480.0, 200.0)
        .with_padding(10.0)
        .with_background(MinecraftColor::White.foreground(), 0.2)
        .add_shape(
            Shape::line(0.0, 30.0, 460.0, 30.0)
                .with_color(MinecraftColor::Gray.foreground())
                .with_alpha(0.5),
        )
        .add_text(
            TextEntry::new(prestige_markup(1234), 0.0, 0.0, 20.0).with_alignment(Alignment::Center),
        )
        .add_text(TextEntry::new(
            "<white>Wins</white> <green>4821</green>",
            0.0,
            40.0,
            20.0,
        ));
    stats.render(&mut surface).expect("box renders");

    let mut cursor = DrawCursor::new(20.0, 320.0);
    draw_gradient(
        &mut surface,
        "Session",
        &mut cursor,
        Rgb::new(255, 85, 85),
        Rgb::new(85, 85, 255),
    );

    let svg = surface.into_svg();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("<line "));
    assert!(svg.contains("fill-opacity=\"0.2\""));
    // Gradient endpoints appear verbatim.
    assert!(svg.contains("#FF5555"));
    assert!(svg.contains("#5555FF"));
    // Every chat-color tag was consumed, none leaked into text content.
    assert!(!svg.contains("&lt;gold&gt;"));
}

#[test]
fn svg_and_recording_surfaces_measure_identically() {
    let markup = "<white>Final Kills</white> <aqua>1537</aqua>";
    let plain = strip_markup(markup);

    let mut svg = SvgSurface::new(500.0, 100.0);
    let mut rec = RecordingSurface::new();
    svg.set_font_size(20.0);
    rec.set_font_size(20.0);
    assert_eq!(svg.measure_text(&plain), rec.measure_text(&plain));

    let mut svg_cursor = DrawCursor::new(0.0, 40.0);
    let mut rec_cursor = DrawCursor::new(0.0, 40.0);
    let default = MinecraftColor::White.foreground();
    draw_markup(&mut svg, markup, &mut svg_cursor, default, true);
    draw_markup(&mut rec, markup, &mut rec_cursor, default, true);
    assert_eq!(svg_cursor.x, rec_cursor.x);
}
