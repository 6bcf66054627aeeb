//! Tests for GIF visualization capture and frame generation

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::executor::{CollapseEvent, Generator, GeneratorConfig};
    use tilecollapse::io::presets::Preset;
    use tilecollapse::io::visualization::VisualizationCapture;
    use tilecollapse::spatial::grid::Position;

    fn finished_maze() -> Generator {
        let tiles = Preset::Maze.tile_set().expect("preset builds");
        let mut generator =
            Generator::new(GeneratorConfig::new(4, 3, 42), tiles).expect("valid config");
        generator.run().expect("run completes");
        generator
    }

    // Tests VisualizationCapture construction
    // Verified by initializing with non-empty events
    #[test]
    fn test_visualization_capture_new() {
        let tiles = Preset::Maze.tile_set().expect("preset builds");
        let viz = VisualizationCapture::new(10, 10, tiles);
        assert_eq!(viz.event_count(), 0);
        assert!(viz.events().is_empty());
    }

    // Tests event recording increments count
    // Verified by removing record body
    #[test]
    fn test_record_event() {
        let tiles = Preset::Maze.tile_set().expect("preset builds");
        let mut viz = VisualizationCapture::new(10, 10, tiles);
        let event = CollapseEvent {
            step: 1,
            position: Position::new(5, 5),
            tile: 1,
            forced: false,
        };

        viz.record(event);
        assert_eq!(viz.event_count(), 1);
        assert_eq!(viz.events(), &[event]);
    }

    // Tests capture mirrors the generator history
    #[test]
    fn test_from_generator() {
        let generator = finished_maze();
        let viz = VisualizationCapture::from_generator(&generator);
        assert_eq!(viz.event_count(), 12);
        assert_eq!(viz.events(), generator.history());
    }

    // Tests GIF export writes a decodable animation
    // Verified by skipping the encoder
    #[test]
    fn test_export_gif() {
        let viz = VisualizationCapture::from_generator(&finished_maze());
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("frames").join("run.gif");

        viz.export_gif(&path, 5, 2).expect("export succeeds");
        assert!(path.exists());
        let decoded = image::open(&path).expect("readable GIF");
        assert_eq!((decoded.width(), decoded.height()), (4 * 3 * 2, 3 * 3 * 2));
    }

    // Tests exporting nothing is rejected
    #[test]
    fn test_export_empty_capture() {
        let tiles = Preset::Maze.tile_set().expect("preset builds");
        let viz = VisualizationCapture::new(2, 2, tiles);
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.gif");

        let result = viz.export_gif(&path, 5, 2);
        assert!(matches!(result, Err(AlgorithmError::InvalidParameter { .. })));
        assert!(!path.exists());
    }

    // Tests zero scale is rejected
    #[test]
    fn test_export_zero_scale() {
        let viz = VisualizationCapture::from_generator(&finished_maze());
        let dir = tempfile::tempdir().expect("temp dir");
        let result = viz.export_gif(&dir.path().join("run.gif"), 5, 0);
        assert!(matches!(result, Err(AlgorithmError::InvalidParameter { .. })));
    }
}
