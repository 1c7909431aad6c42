use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classification::domain::attribute_classifier::AgeGenderClassifier;
use crate::classification::domain::class_network::ClassNetwork;
use crate::classification::infrastructure::network_factory::{load_network, NetworkBackend};
use crate::compositing::infrastructure::logo_loader::load_logo;
use crate::detection::domain::face_locator::DetectionParams;
use crate::detection::infrastructure::cascade_face_locator::CascadeFaceLocator;
use crate::pipeline::detection_context::DetectionContext;
use crate::shared::config::ResourcePaths;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{what} not found at {path}")]
    MissingFile { what: &'static str, path: PathBuf },
    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
    #[error("failed to load face classifier {path}: {message}")]
    Classifier { path: PathBuf, message: String },
    #[error("failed to load {what} network {path}: {message}")]
    Network {
        what: &'static str,
        path: PathBuf,
        message: String,
    },
    #[error("failed to load logo {path}: {message}")]
    Logo { path: PathBuf, message: String },
}

/// Loads every model and the logo, or reports the first one that fails.
///
/// All required files are checked for existence before any of them is
/// parsed, so a missing file is reported without paying for model loading.
pub fn load_detection_context(
    paths: &ResourcePaths,
    params: &DetectionParams,
    logo_width: u32,
) -> Result<DetectionContext, LoadError> {
    let mut required = vec![
        ("face cascade", paths.face_cascade.as_path()),
        ("age model", paths.age_model.as_path()),
        ("gender model", paths.gender_model.as_path()),
    ];
    if NetworkBackend::for_model(&paths.age_model) == NetworkBackend::Caffe {
        required.push(("age prototxt", paths.age_proto.as_path()));
    }
    if NetworkBackend::for_model(&paths.gender_model) == NetworkBackend::Caffe {
        required.push(("gender prototxt", paths.gender_proto.as_path()));
    }
    if let Some(logo) = &paths.logo {
        required.push(("logo", logo.as_path()));
    }
    for (what, path) in required {
        require_file(what, path)?;
    }

    let locator = CascadeFaceLocator::new(&paths.face_cascade, params.clone()).map_err(|e| {
        LoadError::Classifier {
            path: paths.face_cascade.clone(),
            message: e.to_string(),
        }
    })?;
    log::info!("Loaded face cascade {}", paths.face_cascade.display());

    let age_net = load_named_network("age", &paths.age_model, &paths.age_proto)?;
    let gender_net = load_named_network("gender", &paths.gender_model, &paths.gender_proto)?;
    let classifier = AgeGenderClassifier::new(age_net, gender_net);

    let logo = match &paths.logo {
        Some(path) => {
            let logo = load_logo(path, logo_width).map_err(|e| LoadError::Logo {
                path: path.clone(),
                message: e.to_string(),
            })?;
            log::info!(
                "Loaded logo {} ({}x{})",
                path.display(),
                logo.width(),
                logo.height()
            );
            Some(logo)
        }
        None => {
            log::info!("Logo overlay disabled");
            None
        }
    };

    Ok(DetectionContext {
        locator: Box::new(locator),
        classifier: Box::new(classifier),
        logo,
    })
}

fn require_file(what: &'static str, path: &Path) -> Result<(), LoadError> {
    if path.to_str().is_none() {
        return Err(LoadError::InvalidPath(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(LoadError::MissingFile {
            what,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn load_named_network(
    what: &'static str,
    model: &Path,
    proto: &Path,
) -> Result<Box<dyn ClassNetwork>, LoadError> {
    let net = load_network(model, proto).map_err(|e| LoadError::Network {
        what,
        path: model.to_path_buf(),
        message: e.to_string(),
    })?;
    log::info!(
        "Loaded {what} network {} ({:?})",
        model.display(),
        NetworkBackend::for_model(model)
    );
    Ok(net)
}
