//! Tests for error display, sources and conversions

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use terrasynth::SynthesisError;
    use terrasynth::io::error::{computation_error, invalid_parameter, path_error};

    // Tests parameter errors name the parameter and value
    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("window size", &4, &"must be odd");
        let message = error.to_string();

        assert!(message.contains("window size"));
        assert!(message.contains('4'));
        assert!(message.contains("must be odd"));
        assert!(error.source().is_none());
    }

    // Tests I/O errors convert and keep their source
    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: SynthesisError = io.into();

        assert!(matches!(error, SynthesisError::FileSystem { .. }));
        assert!(error.source().is_some());
    }

    // Tests JSON errors become model format errors
    #[test]
    fn test_json_error_conversion() {
        let json = serde_json::from_str::<u32>("{").unwrap_err();
        let error: SynthesisError = json.into();

        assert!(matches!(error, SynthesisError::ModelFormat { source: Some(_), .. }));
        assert!(error.to_string().contains("malformed JSON"));
        assert!(error.source().is_some());
    }

    // Tests remaining constructors and their display
    #[test]
    fn test_other_variants_display() {
        let computation = computation_error("distribution", &"sum is 0.9");
        assert!(computation.to_string().contains("distribution"));

        let path = path_error("Target must be a PNG file or directory");
        assert!(path.to_string().contains("PNG"));

        let exemplar = SynthesisError::InvalidExemplar {
            reason: "one color".to_string(),
        };
        assert!(exemplar.to_string().contains("one color"));

        let load = image::open(PathBuf::from("missing.png")).unwrap_err();
        let error = SynthesisError::ImageLoad {
            path: PathBuf::from("missing.png"),
            source: load,
        };
        assert!(error.to_string().contains("missing.png"));
        assert!(error.source().is_some());
    }
}
