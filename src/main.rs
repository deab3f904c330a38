use diagramflow::DiagramApp;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "DiagramFlow",
        native_options,
        Box::new(|cc| Ok(Box::new(DiagramApp::new(cc)))),
    )
}
