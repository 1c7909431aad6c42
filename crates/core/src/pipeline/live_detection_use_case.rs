use std::time::Instant;

use crate::pipeline::frame_annotator::FrameAnnotator;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::{KEY_POLL_MS, QUIT_KEY};
use crate::video::domain::frame_display::FrameDisplay;
use crate::video::domain::frame_source::FrameSource;

/// Why the live loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The user pressed the quit key.
    QuitRequested,
    /// The source returned no frame or failed to read one.
    CaptureEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated(TerminationReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    pub reason: TerminationReason,
    pub frames_processed: usize,
}

/// Live capture loop: read → mirror → annotate → show → poll key.
///
/// Runs until the quit key is pressed or the source stops producing
/// frames. The source and display are closed on every exit path,
/// including errors.
pub struct LiveDetectionUseCase {
    source: Box<dyn FrameSource>,
    display: Box<dyn FrameDisplay>,
    annotator: FrameAnnotator,
    logger: Box<dyn PipelineLogger>,
    quit_key: char,
}

impl LiveDetectionUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        display: Box<dyn FrameDisplay>,
        annotator: FrameAnnotator,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            display,
            annotator,
            logger,
            quit_key: QUIT_KEY,
        }
    }

    pub fn with_quit_key(mut self, key: char) -> Self {
        self.quit_key = key;
        self
    }

    pub fn execute(&mut self) -> Result<LoopOutcome, Box<dyn std::error::Error>> {
        let mut frames_processed = 0;
        let result = loop {
            match self.step() {
                Ok(LoopState::Running) => {
                    frames_processed += 1;
                    self.logger.progress(frames_processed);
                }
                Ok(LoopState::Terminated(reason)) => {
                    if reason == TerminationReason::QuitRequested {
                        frames_processed += 1;
                    }
                    break Ok(LoopOutcome {
                        reason,
                        frames_processed,
                    });
                }
                Err(e) => break Err(e),
            }
        };

        self.source.close();
        self.display.close();

        if let Ok(outcome) = &result {
            self.logger.info(&format!(
                "Stopped after {} frames ({:?})",
                outcome.frames_processed, outcome.reason
            ));
        }
        self.logger.summary();
        result
    }

    fn step(&mut self) -> Result<LoopState, Box<dyn std::error::Error>> {
        let mut frame = match self.source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::warn!("Capture source returned no frame");
                return Ok(LoopState::Terminated(TerminationReason::CaptureEnded));
            }
            Err(e) => {
                log::warn!("Frame read failed: {e}");
                return Ok(LoopState::Terminated(TerminationReason::CaptureEnded));
            }
        };

        frame.flip_horizontal();
        self.annotator.annotate(&mut frame, self.logger.as_mut())?;

        let t0 = Instant::now();
        self.display.show(&frame)?;
        let key = self.display.poll_key(KEY_POLL_MS)?;
        self.logger
            .timing("display", t0.elapsed().as_secs_f64() * 1000.0);

        if key == Some(self.quit_key) {
            return Ok(LoopState::Terminated(TerminationReason::QuitRequested));
        }
        Ok(LoopState::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::attribute_classifier::AttributeClassifier;
    use crate::classification::domain::labels::Classification;
    use crate::compositing::domain::frame_compositor::FrameCompositor;
    use crate::compositing::domain::overlay_renderer::{BoxStyle, LabelStyle, OverlayRenderer};
    use crate::detection::domain::face_locator::FaceLocator;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::face_box::FaceBox;
    use crate::shared::frame::{Frame, GrayFrame};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    enum Read {
        Frame(Frame),
        Fail,
    }

    struct StubSource {
        reads: VecDeque<Read>,
        closed: Arc<Mutex<usize>>,
    }

    impl StubSource {
        fn new(reads: Vec<Read>) -> Self {
            Self {
                reads: reads.into(),
                closed: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl FrameSource for StubSource {
        fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            match self.reads.pop_front() {
                Some(Read::Frame(f)) => Ok(Some(f)),
                Some(Read::Fail) => Err("device unplugged".into()),
                None => Ok(None),
            }
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() += 1;
        }
    }

    struct StubDisplay {
        keys: VecDeque<Option<char>>,
        shown: Arc<Mutex<Vec<Frame>>>,
        closed: Arc<Mutex<usize>>,
        fail_show: bool,
    }

    impl StubDisplay {
        fn new(keys: Vec<Option<char>>) -> Self {
            Self {
                keys: keys.into(),
                shown: Arc::new(Mutex::new(Vec::new())),
                closed: Arc::new(Mutex::new(0)),
                fail_show: false,
            }
        }
    }

    impl FrameDisplay for StubDisplay {
        fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_show {
                return Err("window gone".into());
            }
            self.shown.lock().unwrap().push(frame.clone());
            Ok(())
        }

        fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>> {
            assert_eq!(timeout_ms, 1);
            Ok(self.keys.pop_front().flatten())
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() += 1;
        }
    }

    struct NoFaces;

    impl FaceLocator for NoFaces {
        fn locate(&mut self, _gray: &GrayFrame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
            Ok(vec![])
        }
    }

    struct UnusedClassifier;

    impl AttributeClassifier for UnusedClassifier {
        fn classify(&mut self, _face: &Frame) -> Result<Classification, Box<dyn std::error::Error>> {
            Err("classifier should not run".into())
        }
    }

    struct NoopRenderer;

    impl OverlayRenderer for NoopRenderer {
        fn draw_box(
            &mut self,
            _frame: &mut Frame,
            _face: &FaceBox,
            _style: &BoxStyle,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn draw_label(
            &mut self,
            _frame: &mut Frame,
            _text: &str,
            _origin: (i32, i32),
            _style: &LabelStyle,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    struct RecordingLogger {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl PipelineLogger for RecordingLogger {
        fn progress(&mut self, _frames_done: usize) {}
        fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
        fn metric(&mut self, _name: &str, _value: f64) {}
        fn info(&mut self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    // --- Helpers ---

    fn annotator() -> FrameAnnotator {
        FrameAnnotator::new(
            Box::new(NoFaces),
            Box::new(UnusedClassifier),
            FrameCompositor::new(Box::new(NoopRenderer), None, (10, 10)),
        )
    }

    fn frames(count: usize) -> Vec<Read> {
        (0..count)
            .map(|i| Read::Frame(Frame::filled(8, 4, [i as u8, 0, 0], i)))
            .collect()
    }

    fn use_case(source: StubSource, display: StubDisplay) -> LiveDetectionUseCase {
        LiveDetectionUseCase::new(
            Box::new(source),
            Box::new(display),
            annotator(),
            Box::new(NullPipelineLogger),
        )
    }

    // --- Tests ---

    #[test]
    fn test_quit_key_stops_loop() {
        let source = StubSource::new(frames(10));
        let display = StubDisplay::new(vec![None, None, Some('q')]);
        let shown = display.shown.clone();

        let outcome = use_case(source, display).execute().unwrap();
        assert_eq!(outcome.reason, TerminationReason::QuitRequested);
        assert_eq!(outcome.frames_processed, 3);
        assert_eq!(shown.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let source = StubSource::new(frames(3));
        let display = StubDisplay::new(vec![Some('Q'), Some('x'), Some(' ')]);

        let outcome = use_case(source, display).execute().unwrap();
        assert_eq!(outcome.reason, TerminationReason::CaptureEnded);
        assert_eq!(outcome.frames_processed, 3);
    }

    #[test]
    fn test_custom_quit_key() {
        let source = StubSource::new(frames(5));
        let display = StubDisplay::new(vec![Some('q'), Some('x')]);

        let outcome = use_case(source, display)
            .with_quit_key('x')
            .execute()
            .unwrap();
        assert_eq!(outcome.reason, TerminationReason::QuitRequested);
        assert_eq!(outcome.frames_processed, 2);
    }

    #[test]
    fn test_exhausted_source_ends_capture_and_releases() {
        let source = StubSource::new(frames(2));
        let source_closed = source.closed.clone();
        let display = StubDisplay::new(vec![]);
        let display_closed = display.closed.clone();

        let outcome = use_case(source, display).execute().unwrap();
        assert_eq!(outcome.reason, TerminationReason::CaptureEnded);
        assert_eq!(outcome.frames_processed, 2);
        assert_eq!(*source_closed.lock().unwrap(), 1);
        assert_eq!(*display_closed.lock().unwrap(), 1);
    }

    #[test]
    fn test_source_running_dry_reports_capture_ended() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let source = StubSource::new(frames(4));
        let source_closed = source.closed.clone();
        let mut use_case = LiveDetectionUseCase::new(
            Box::new(source),
            Box::new(StubDisplay::new(vec![])),
            annotator(),
            Box::new(RecordingLogger {
                messages: messages.clone(),
            }),
        );

        let outcome = use_case.execute().unwrap();
        assert_eq!(
            outcome,
            LoopOutcome {
                reason: TerminationReason::CaptureEnded,
                frames_processed: 4,
            }
        );
        assert_eq!(*source_closed.lock().unwrap(), 1);
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["Stopped after 4 frames (CaptureEnded)".to_string()]
        );
    }

    #[test]
    fn test_read_failure_ends_capture() {
        let mut reads = frames(1);
        reads.push(Read::Fail);
        reads.extend(frames(3));
        let display = StubDisplay::new(vec![]);
        let shown = display.shown.clone();

        let outcome = use_case(StubSource::new(reads), display).execute().unwrap();
        assert_eq!(outcome.reason, TerminationReason::CaptureEnded);
        assert_eq!(outcome.frames_processed, 1);
        assert_eq!(shown.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_frames_are_mirrored_before_display() {
        let mut frame = Frame::filled(4, 1, [0, 0, 0], 0);
        frame.data_mut()[0..3].copy_from_slice(&[1, 2, 3]);
        let display = StubDisplay::new(vec![Some('q')]);
        let shown = display.shown.clone();

        use_case(StubSource::new(vec![Read::Frame(frame)]), display)
            .execute()
            .unwrap();

        let shown = shown.lock().unwrap();
        assert_eq!(&shown[0].data()[9..12], &[1, 2, 3]);
        assert_eq!(&shown[0].data()[0..3], &[0, 0, 0]);
    }

    #[test]
    fn test_display_error_still_releases_resources() {
        let source = StubSource::new(frames(3));
        let source_closed = source.closed.clone();
        let mut display = StubDisplay::new(vec![]);
        display.fail_show = true;
        let display_closed = display.closed.clone();

        let err = use_case(source, display).execute().unwrap_err();
        assert!(err.to_string().contains("window gone"));
        assert_eq!(*source_closed.lock().unwrap(), 1);
        assert_eq!(*display_closed.lock().unwrap(), 1);
    }

    #[test]
    fn test_empty_source_processes_nothing() {
        let display = StubDisplay::new(vec![]);
        let shown = display.shown.clone();
        let outcome = use_case(StubSource::new(vec![]), display).execute().unwrap();
        assert_eq!(outcome.frames_processed, 0);
        assert!(shown.lock().unwrap().is_empty());
    }
}
