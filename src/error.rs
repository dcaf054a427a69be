// One error type for the whole app.
// Every variant states *where* things went wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating a window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing a buffer to a window failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed
    #[error("Config error: {0}")]
    Config(String), // Reading or validating the TOML config failed
    #[error("Estimator error: {0}")]
    Estimator(String), // The hand landmark process failed or spoke garbage
}
