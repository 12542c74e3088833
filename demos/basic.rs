use swatchgrid::{ExtractionMode, GridSpec, Session};

fn main() {
    let bytes = std::fs::read("photo.jpg").unwrap();

    let mut session = Session::new();
    let found = session.load_image(&bytes).unwrap();
    println!("{found} colors found");

    let palette = session.extract(ExtractionMode::Partial(8)).unwrap();
    for code in palette {
        println!("{code}");
    }

    let png = session.export_palette(&GridSpec::default()).unwrap();
    std::fs::write("palette.png", png).unwrap();
}
