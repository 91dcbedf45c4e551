//! Binary entry point for the certificate designer.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    certcanvas::run_app()
}
