
use failure::Fail;



pub type AppResult<T> = Result<T, AppError>;


#[derive(Fail, Debug)]
pub enum AppError {
    #[fail(display = "GIF error: {}", _0)]
    Gif(gif_animation::GifError),
    #[fail(display = "Not a integer: {}", _0)]
    Int(std::num::ParseIntError),
    #[fail(display = "Invalid color: {}", _0)]
    InvalidColor(String),
    #[fail(display = "IO error: {}", _0)]
    Io(std::io::Error),
    #[fail(display = "Not enough argument")]
    NotEnoughArgument,
    #[fail(display = "Unknown command: {}", _0)]
    UnknownCommand(String),
}

macro_rules! define_error {
    ($source:ty, $kind:ident) => {
        impl From<$source> for AppError {
            fn from(error: $source) -> AppError {
                AppError::$kind(error)
            }
        }
    }
}

define_error!(std::io::Error, Io);
define_error!(std::num::ParseIntError, Int);
define_error!(gif_animation::GifError, Gif);
