//! Parser resynchronisation under line noise

use proptest::prelude::*;
use timedial_protocol::{Frame, FrameParser, FRAME_START};

proptest! {
    #[test]
    fn frame_after_noise_is_recovered(
        noise in proptest::collection::vec(any::<u8>().prop_filter("no start byte", |b| *b != FRAME_START), 0..32),
        msg_type in any::<u8>(),
        seq in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let frame = Frame::new(msg_type, seq, &payload).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        for &b in &noise {
            prop_assert_eq!(parser.feed(b), Ok(None));
        }
        prop_assert_eq!(parser.feed_bytes(&encoded), Ok(Some(frame)));
    }
}
