pub const FACE_CASCADE_FILE: &str = "haarcascade_frontalface_default.xml";

pub const AGE_PROTO_FILE: &str = "age_deploy.prototxt";
pub const AGE_MODEL_FILE: &str = "age_net.caffemodel";

pub const GENDER_PROTO_FILE: &str = "gender_deploy.prototxt";
pub const GENDER_MODEL_FILE: &str = "gender_net.caffemodel";

pub const LOGO_FILE: &str = "cpf-logo.png";

/// Target logo width; height follows the source aspect ratio.
pub const LOGO_WIDTH: u32 = 150;

/// Top-left corner of the logo overlay.
pub const LOGO_OFFSET: (u32, u32) = (10, 10);

pub const WINDOW_TITLE: &str = "Age and Gender Detection";

pub const QUIT_KEY: char = 'q';

/// Key poll timeout; also paces the display loop.
pub const KEY_POLL_MS: i32 = 1;

pub const DEFAULT_CAMERA_INDEX: i32 = 0;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
