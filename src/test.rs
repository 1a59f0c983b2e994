use crate::{num::*, *};

fn ch(n: u8) -> Channel {
    Channel::new(n).unwrap()
}

fn test_equiv(list: &[(&[u8], Message)]) {
    for (raw, msg) in list {
        assert_eq!(decode(raw).unwrap().as_ref(), Some(msg), "decoding {:02X?}", raw);
        assert_eq!(&encode(msg).unwrap()[..], *raw, "encoding {:?}", msg);
    }
}

mod codec {
    use super::*;

    #[test]
    fn channel_msg() {
        test_equiv(&[
            // Note off
            (&[0x80, 0, 63], Message::note_off(ch(1), u7::new(0), u7::new(63))),
            (&[0x8A, 127, 0], Message::note_off(ch(11), u7::new(127), u7::new(0))),
            // Note on
            (&[0x90, 69, 80], Message::note_on(ch(1), u7::new(69), u7::new(80))),
            (&[0x97, 121, 127], Message::note_on(ch(8), u7::new(121), u7::new(127))),
            // Polyphonic after-touch
            (&[0xA0, 0, 63], Message::poly_after_touch(ch(1), u7::new(0), u7::new(63))),
            (&[0xAF, 64, 1], Message::poly_after_touch(ch(16), u7::new(64), u7::new(1))),
            // Control change
            (&[0xB0, 7, 100], Message::control_change(ch(1), u7::new(7), u7::new(100))),
            (&[0xBA, 127, 0], Message::control_change(ch(11), u7::new(127), u7::new(0))),
            // Program change
            (&[0xC0, 0], Message::program_change(ch(1), u7::new(0))),
            (&[0xC5, 127], Message::program_change(ch(6), u7::new(127))),
            // Channel after-touch
            (&[0xD7, 121], Message::channel_after_touch(ch(8), u7::new(121))),
            // Pitch bend
            (&[0xE0, 0, 0x40], Message::pitch_bend(ch(1), u14::new(0x2000))),
            (&[0xEF, 0x7F, 0x7F], Message::pitch_bend(ch(16), u14::new(0x3FFF))),
            (&[0xE3, 0x01, 0x00], Message::pitch_bend(ch(4), u14::new(1))),
        ]);
    }

    #[test]
    fn system_msg() {
        test_equiv(&[
            (&[0xF8], Message::realtime(RealtimeStatus::TimingClock)),
            (&[0xF9], Message::realtime(RealtimeStatus::Start)),
            (&[0xFB], Message::realtime(RealtimeStatus::Continue)),
            (&[0xFC], Message::realtime(RealtimeStatus::Stop)),
            (&[0xFE], Message::realtime(RealtimeStatus::ActiveSensing)),
            (&[0xFF], Message::realtime(RealtimeStatus::SystemReset)),
            (&[0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7], Message::sysex(vec![0x7E, 0x7F, 0x09, 0x01])),
            (&[0xF0, 0xF7], Message::sysex(vec![])),
        ]);
    }

    #[test]
    fn encoded_sizes() {
        let sizes = [
            (Message::realtime(RealtimeStatus::Stop), 1),
            (Message::program_change(ch(1), u7::new(3)), 2),
            (Message::channel_after_touch(ch(1), u7::new(3)), 2),
            (Message::note_on(ch(1), u7::new(3), u7::new(4)), 3),
            (Message::sysex(vec![1, 2, 3, 4]), 6),
        ];
        for (msg, len) in sizes.iter() {
            let raw = encode(msg).unwrap();
            assert_eq!(raw.len(), *len);
            assert_eq!(raw.capacity(), *len);
        }
    }

    #[test]
    fn encode_into_buffer() {
        let mut buf = [0; 6];
        let msg = Message::control_change(ch(2), u7::new(7), u7::new(100));
        assert_eq!(encode_into(&msg, &mut buf, 2), Ok(5));
        assert_eq!(buf, [0, 0, 0xB1, 7, 100, 0]);
        assert_eq!(
            encode_into(&msg, &mut buf, 4),
            Err(Error::OutOfSpace {
                offset: 5,
                needed: 2,
                len: 6
            })
        );
        assert_eq!(
            encode_into(&msg, &mut buf, 7).map_err(|err| err.kind()),
            Err(ErrorKind::Range)
        );
    }

    #[test]
    fn truncated() {
        let err = decode(&[0x90, 60]).unwrap_err();
        assert_eq!(
            err,
            Error::Truncated {
                offset: 1,
                needed: 2,
                len: 2
            }
        );
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(decode(&[0xC0]).is_err());
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn status_byte_ends_message() {
        let buf = [0x90, 60, 0x80, 61, 0];
        let res = Decoder::new().decode(&buf, 0);
        if cfg!(feature = "strict") {
            let err = res.unwrap_err();
            assert!(matches!(err, Error::Malformed { offset: 2, .. }));
            assert_eq!(err.kind(), ErrorKind::Malformed);
        } else {
            assert_eq!(
                res.unwrap(),
                Decoded {
                    message: None,
                    interleaved: Vec::new(),
                    next_offset: 2
                }
            );
            let msgs = Decoder::new()
                .messages(&buf)
                .collect::<Result<Vec<_>>>()
                .unwrap();
            assert_eq!(msgs, vec![Message::note_off(ch(1), u7::new(61), u7::new(0))]);
        }
    }

    #[test]
    fn realtime_between_data_bytes() {
        let buf = [0x90, 60, 0xF8, 100];
        let mut decoder = Decoder::new();
        assert_eq!(
            decoder.decode(&buf, 0),
            Ok(Decoded {
                message: Some(Message::note_on(ch(1), u7::new(60), u7::new(100))),
                interleaved: vec![Message::realtime(RealtimeStatus::TimingClock)],
                next_offset: 4
            })
        );
        assert_eq!(
            decoder.running_status().current(),
            Some((Status::NoteOn, ch(1)))
        );

        let msgs = Decoder::new()
            .messages(&buf)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            msgs,
            vec![
                Message::realtime(RealtimeStatus::TimingClock),
                Message::note_on(ch(1), u7::new(60), u7::new(100)),
            ]
        );
    }

    #[test]
    fn realtime_under_running_status() {
        let msgs = Decoder::new()
            .messages(&[0xE0, 0xFE, 0, 0x40, 1, 0xF8, 0xFD, 0xFC, 0x40])
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            msgs,
            vec![
                Message::realtime(RealtimeStatus::ActiveSensing),
                Message::pitch_bend(ch(1), u14::new(0x2000)),
                Message::realtime(RealtimeStatus::TimingClock),
                Message::realtime(RealtimeStatus::Stop),
                Message::pitch_bend(ch(1), u14::new(0x2001)),
            ]
        );
    }

    #[test]
    fn realtime_inside_sysex() {
        let decoded = Decoder::new()
            .decode(&[0xF0, 1, 0xF8, 2, 0xFF, 0xF7, 0xC0], 0)
            .unwrap();
        assert_eq!(decoded.message, Some(Message::sysex(vec![1, 2])));
        assert_eq!(
            decoded.interleaved,
            vec![
                Message::realtime(RealtimeStatus::TimingClock),
                Message::realtime(RealtimeStatus::SystemReset),
            ]
        );
        assert_eq!(decoded.next_offset, 6);
    }

    #[test]
    fn truncated_after_realtime() {
        assert_eq!(
            Decoder::new().decode(&[0x90, 60, 0xF8], 0),
            Err(Error::Truncated {
                offset: 1,
                needed: 2,
                len: 3
            })
        );
    }

    #[test]
    fn cursor_writes_in_place() {
        use crate::io::{Cursor, Write};

        let mut buf = [0; 4];
        let mut cursor = Cursor::from_parts(&mut buf, 1).unwrap();
        cursor.write_all(&[0xB0, 7]).unwrap();
        assert_eq!(cursor.cursor(), 3);
        assert_eq!(
            cursor.write_all(&[100, 0]),
            Err(Error::OutOfSpace {
                offset: 3,
                needed: 2,
                len: 4
            })
        );
        assert_eq!(buf, [0, 0xB0, 7, 0]);
        assert!(Cursor::from_parts(&mut buf, 5).is_err());
    }
}

mod vlq {
    use super::*;

    const CASES: &[(&[u8], u32)] = &[
        (&[0x00], 0),
        (&[0x40], 0x40),
        (&[0x7F], 127),
        (&[0x81, 0x00], 128),
        (&[0xC0, 0x00], 8192),
        (&[0xFF, 0x7F], 16383),
        (&[0x81, 0x80, 0x00], 16384),
        (&[0xFF, 0xFF, 0x7F], 0x1F_FFFF),
        (&[0x81, 0x80, 0x80, 0x00], 0x20_0000),
        (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
    ];

    #[test]
    fn read() {
        for &(raw, value) in CASES {
            assert_eq!(read_vlq(raw, 0), Ok((u28::new(value), raw.len())));
        }
        assert_eq!(read_vlq(&[0xAA, 0x81, 0x00, 0x55], 1), Ok((u28::new(128), 2)));
    }

    #[test]
    fn write() {
        for &(raw, value) in CASES {
            let mut out = Vec::<u8>::new();
            write_vlq(u28::new(value), &mut out).unwrap();
            assert_eq!(out, raw);
            assert_eq!(vlq_len(u28::new(value)), raw.len());
        }
    }

    #[test]
    fn overflow() {
        let err = read_vlq(&[0x80, 0x80, 0x80, 0x80], 0).unwrap_err();
        assert_eq!(err, Error::VlqOverflow { offset: 0 });
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            read_vlq(&[0x81], 0),
            Err(Error::Truncated {
                offset: 1,
                needed: 1,
                len: 1
            })
        );
    }
}

mod running {
    use super::*;

    #[test]
    fn omitted_status() {
        let mut decoder = Decoder::new();
        let msgs = decoder
            .messages(&[0x90, 69, 80, 72, 90])
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            msgs,
            vec![
                Message::note_on(ch(1), u7::new(69), u7::new(80)),
                Message::note_on(ch(1), u7::new(72), u7::new(90)),
            ]
        );
        assert_eq!(
            decoder.running_status().current(),
            Some((Status::NoteOn, ch(1)))
        );
    }

    #[test]
    fn across_buffers() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.messages(&[0xC3, 5]).count(), 1);
        let msgs = decoder
            .messages(&[6, 7])
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            msgs,
            vec![
                Message::program_change(ch(4), u7::new(6)),
                Message::program_change(ch(4), u7::new(7)),
            ]
        );
    }

    #[test]
    fn system_messages_keep_running_status() {
        let mut decoder = Decoder::new();
        let msgs = decoder
            .messages(&[0xB0, 7, 100, 0xF8, 8, 50, 0xF0, 1, 0xF7, 10, 64])
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            msgs,
            vec![
                Message::control_change(ch(1), u7::new(7), u7::new(100)),
                Message::realtime(RealtimeStatus::TimingClock),
                Message::control_change(ch(1), u7::new(8), u7::new(50)),
                Message::sysex(vec![1]),
                Message::control_change(ch(1), u7::new(10), u7::new(64)),
            ]
        );
    }

    #[test]
    fn no_running_status() {
        let err = decode(&[69, 80]).unwrap_err();
        assert_eq!(err, Error::NoRunningStatus { offset: 0, byte: 69 });
        assert_eq!(err.kind(), ErrorKind::Invalid);

        let mut decoder = Decoder::new();
        decoder.decode(&[0x90, 60, 1], 0).unwrap();
        decoder.reset();
        assert!(decoder.decode(&[60, 1], 0).is_err());
    }

    #[test]
    fn failed_decode_keeps_state() {
        let mut decoder = Decoder::new();
        assert!(decoder.decode(&[0x92, 60], 0).is_err());
        assert_eq!(decoder.running_status().current(), None);

        decoder.decode(&[0x91, 60, 1], 0).unwrap();
        assert!(decoder.decode(&[0xE5, 0], 0).is_err());
        assert_eq!(
            decoder.running_status().current(),
            Some((Status::NoteOn, ch(2)))
        );
    }

    #[test]
    fn state_machine() {
        let mut running = RunningStatus::new();
        assert_eq!(running.current(), None);
        running.set(Status::PitchBend, ch(9));
        assert_eq!(running.current(), Some((Status::PitchBend, ch(9))));
        running.set(Status::NoteOff, ch(1));
        assert_eq!(running.current(), Some((Status::NoteOff, ch(1))));
        running.reset();
        assert_eq!(running.current(), None);
    }

    #[test]
    fn iterator_stops_on_error() {
        let mut decoder = Decoder::new();
        let mut msgs = decoder.messages(&[0xF8, 0x90, 60]);
        assert!(msgs.next().unwrap().is_ok());
        assert!(msgs.next().unwrap().is_err());
        assert!(msgs.next().is_none());
    }
}

mod status {
    use super::*;

    #[test]
    fn channel_status_byte() {
        assert_eq!(
            channel_status_encoder(Status::NoteOn, ch(1)),
            Some(0b1001_0000)
        );
        assert_eq!(
            channel_status_decoder(0b1001_0000),
            Some((Status::NoteOn, ch(1)))
        );
        assert_eq!(
            channel_status_encoder(Status::PitchBend, ch(16)),
            Some(0xEF)
        );
        assert_eq!(channel_status_encoder(Status::TimingClock, ch(1)), None);
        assert_eq!(channel_status_decoder(0xF8), None);
        assert_eq!(channel_status_decoder(0x45), None);
        assert_eq!(system_status_encoder(Status::SysEx), Some(0xF0));
        assert_eq!(system_status_encoder(Status::NoteOn), None);
    }

    #[test]
    fn classify_bytes() {
        let system = [
            0xF0, 0xF1, 0xF2, 0xF3, 0xF6, 0xF8, 0xF9, 0xFB, 0xFC, 0xFE, 0xFF,
        ];
        for byte in 0..=255u8 {
            assert_eq!(is_system(byte), system.contains(&byte), "{:#04x}", byte);
            assert_eq!(has_status_byte(byte), byte >= 0x80, "{:#04x}", byte);
        }
    }

    #[test]
    fn codes() {
        for &status in Status::ALL.iter() {
            let code = status.code();
            if status.is_channel() {
                assert_eq!(Status::from_channel_nibble(code), Some(status));
                assert_eq!(status.class(), MessageClass::Channel);
            } else {
                assert_eq!(Status::from_system_byte(code), Some(status));
                assert!(is_system(code));
            }
            assert_eq!(
                status.as_realtime().is_some(),
                status.class() == MessageClass::SystemRealtime
            );
        }
        for &status in RealtimeStatus::ALL.iter() {
            assert_eq!(Status::from(status).as_realtime(), Some(status));
        }
        assert_eq!(Status::SysEx.class(), MessageClass::SystemExclusive);
        assert_eq!(Status::SongSelect.class(), MessageClass::SystemCommon);
    }

    #[test]
    fn channels() {
        assert_eq!(Channel::new(0), None);
        assert_eq!(Channel::new(17), None);
        assert_eq!(Channel::from_wire(u4::new(0)), Channel::MIN);
        assert_eq!(Channel::from_wire(u4::new(15)), Channel::MAX);
        assert_eq!(ch(10).to_wire(), u4::new(9));
        assert_eq!(ch(10).to_string(), "10");
    }
}

mod payload {
    use super::*;

    #[test]
    fn note_table() {
        for value in 0..=127u8 {
            let res = Note::deserialize(&[value, 0], 0).unwrap();
            let note = res.payload;
            assert!(!note.name().is_empty());
            assert!(note.frequency() > 0.0);
            assert_eq!(note.name(), NOTE_TABLE[value as usize].name);
            if value > 0 {
                assert!(note.frequency() > NOTE_TABLE[value as usize - 1].frequency);
            }
        }
        let a4 = &NOTE_TABLE[69];
        assert_eq!(a4.name, "A4");
        assert_eq!(a4.frequency, 440.0);
        assert_eq!(NOTE_TABLE[81].frequency, 880.0);
        assert_eq!(NOTE_TABLE[60].name, "C4");
        assert_eq!(NOTE_TABLE[61].name, "C#4");
        assert_eq!(NOTE_TABLE[0].name, "C-1");
        assert_eq!(NOTE_TABLE[127].name, "G9");
        assert!((NOTE_TABLE[60].frequency - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn sysex_boundary() {
        let buf = [0xF0, 1, 2, 3, 0xF7, 0x90];
        let res = SysexValue::deserialize(&buf, 1).unwrap();
        assert_eq!(res.payload, SysexValue(vec![1, 2, 3]));
        assert_eq!(res.next_offset, 5);

        let decoded = Decoder::new().decode(&buf, 0).unwrap();
        assert_eq!(decoded.message, Some(Message::sysex(vec![1, 2, 3])));
        assert_eq!(decoded.next_offset, 5);
    }

    #[test]
    fn unterminated_sysex() {
        let res = SysexValue::deserialize(&[0xF0, 1, 2], 1);
        if cfg!(feature = "strict") {
            assert_eq!(res.unwrap_err().kind(), ErrorKind::Malformed);
        } else {
            let res = res.unwrap();
            assert_eq!(res.payload.data(), &[1, 2]);
            assert_eq!(res.next_offset, 3);
        }
    }

    #[test]
    fn sysex_cut_short() {
        let buf = [0xF0, 1, 2, 0x90, 60, 100];
        let res = SysexValue::deserialize(&buf, 1);
        if cfg!(feature = "strict") {
            assert!(matches!(res, Err(Error::Malformed { offset: 3, .. })));
        } else {
            let res = res.unwrap();
            assert_eq!(res.payload.data(), &[1, 2]);
            assert_eq!(res.next_offset, 3);
            let msgs = Decoder::new()
                .messages(&buf)
                .collect::<Result<Vec<_>>>()
                .unwrap();
            assert_eq!(
                msgs,
                vec![
                    Message::sysex(vec![1, 2]),
                    Message::note_on(ch(1), u7::new(60), u7::new(100)),
                ]
            );
        }
    }

    #[test]
    fn invalid_sysex() {
        assert_eq!(
            encode(&Message::sysex(vec![1, 0xF7, 2])),
            Err(Error::InvalidSysex {
                index: 1,
                byte: 0xF7
            })
        );
        assert_eq!(SysexValue(vec![1, 2]).encoded_len(), Ok(3));
    }

    #[test]
    fn serialize_at_offset() {
        let note = Note {
            value: u7::new(60),
            velocity: u7::new(100),
        };
        let mut buf = [0; 4];
        assert_eq!(note.serialize(&mut buf, 1), Ok(3));
        assert_eq!(buf, [0, 60, 100, 0]);
        assert_eq!(
            note.serialize(&mut buf[..2], 1),
            Err(Error::OutOfSpace {
                offset: 1,
                needed: 2,
                len: 2
            })
        );
        assert_eq!(Empty.serialize(&mut buf, 4), Ok(4));
        assert_eq!(NumberValue { value: u7::new(9) }.encoded_len(), Ok(1));
    }

    #[test]
    fn pitch_bend_value() {
        let bend = PitchBend::from_value(u14::new(0x1234));
        assert_eq!(bend.lsb, u7::new(0x34));
        assert_eq!(bend.msb, u7::new(0x24));
        assert_eq!(bend.value(), u14::new(0x1234));
        assert_eq!(PitchBend::from_value(u14::new(PitchBend::CENTER)).msb, 0x40);
    }

    #[test]
    fn kinds() {
        for &status in Status::ALL.iter() {
            match status.payload_kind() {
                PayloadKind::Empty => assert!(!status.is_channel()),
                PayloadKind::Sysex => assert_eq!(status, Status::SysEx),
                _ => assert!(status.is_channel()),
            }
        }
        assert_eq!(Note::KIND, PayloadKind::Note);
        assert_eq!(
            Payload::Number(NumberValue { value: u7::new(1) }).kind(),
            PayloadKind::Number
        );
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn unsupported_status() {
        assert_eq!(decode(&[0xF6]), Ok(None));
        let msg = Message::system(Status::TuneRequest).unwrap();
        let err = encode(&msg).unwrap_err();
        assert_eq!(err, Error::UnsupportedStatus(Status::TuneRequest));
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn skip_unsupported_data() {
        let buf = [0xF2, 0x10, 0x20, 0xF8, 0xF4, 0xF7, 0xF1, 0x05];
        let decoded = Decoder::new().decode(&buf, 0).unwrap();
        assert_eq!(
            decoded,
            Decoded {
                message: None,
                interleaved: Vec::new(),
                next_offset: 3
            }
        );
        let msgs = Decoder::new()
            .messages(&buf)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(msgs, vec![Message::realtime(RealtimeStatus::TimingClock)]);
    }

    #[test]
    fn undefined_bytes() {
        for &byte in [0xF4, 0xF5, 0xF7, 0xFA, 0xFD].iter() {
            assert_eq!(decode(&[byte]), Ok(None));
        }
        let mut decoder = Decoder::new();
        decoder.decode(&[0xB4, 1, 2], 0).unwrap();
        decoder.decode(&[0xFD], 0).unwrap();
        assert_eq!(
            decoder.running_status().current(),
            Some((Status::ControlChange, ch(5)))
        );
    }

    #[test]
    fn tables_agree() {
        for &status in Status::ALL.iter() {
            assert_eq!(
                status.deserializer().is_some(),
                status.serializer().is_some(),
                "{:?}",
                status
            );
        }
        assert!(Status::Mtc.deserializer().is_none());
    }

    #[test]
    fn payload_mismatch() {
        let ser = Status::NoteOn.serializer().unwrap();
        assert_eq!(
            ser(Status::NoteOn, None, &mut Vec::<u8>::new()),
            Err(Error::PayloadMismatch(Status::NoteOn))
        );
        let ser = Status::Start.serializer().unwrap();
        let mut out = Vec::<u8>::new();
        assert_eq!(ser(Status::Start, None, &mut out), Ok(()));
        assert!(out.is_empty());
    }

    #[test]
    fn round_trip() {
        let msgs = vec![
            Message::note_on(ch(3), u7::new(1), u7::new(2)),
            Message::poly_after_touch(ch(7), u7::new(100), u7::new(27)),
            Message::pitch_bend(ch(12), u14::new(777)),
            Message::sysex(vec![0x41, 0x10, 0x42]),
            Message::realtime(RealtimeStatus::ActiveSensing),
        ];
        for msg in msgs {
            assert_eq!(decode(&encode(&msg).unwrap()), Ok(Some(msg)));
        }
    }
}

mod message {
    use super::*;

    #[test]
    fn validated_construction() {
        let note = Payload::Note(Note {
            value: u7::new(60),
            velocity: u7::new(1),
        });
        assert_eq!(
            Message::new(Status::NoteOn, Some(ch(1)), Some(note.clone())),
            Ok(Message::note_on(ch(1), u7::new(60), u7::new(1)))
        );
        assert_eq!(
            Message::new(Status::NoteOn, None, Some(note.clone())),
            Err(Error::ChannelMismatch(Status::NoteOn))
        );
        assert_eq!(
            Message::new(Status::TimingClock, Some(ch(1)), None),
            Err(Error::ChannelMismatch(Status::TimingClock))
        );
        assert_eq!(
            Message::new(Status::ProgramChange, Some(ch(1)), Some(note)),
            Err(Error::PayloadMismatch(Status::ProgramChange))
        );
        assert_eq!(
            Message::system(Status::NoteOff).map_err(|err| err.kind()),
            Err(ErrorKind::Invalid)
        );
    }

    #[test]
    fn annotations() {
        let msg = Message::note_on(ch(2), u7::new(69), u7::new(80));
        assert_eq!(msg.note().map(Note::name), Some("A4"));
        let mut msg = msg.annotate(5u32);
        *msg.meta_mut() += 1;
        assert_eq!(*msg.meta(), 6);
        assert_eq!(encode(&msg), Ok(vec![0x91, 69, 80]));
        let (status, channel, _, meta) = msg.clone().into_parts();
        assert_eq!((status, channel, meta), (Status::NoteOn, Some(ch(2)), 6));
        assert_eq!(msg.strip(), Message::note_on(ch(2), u7::new(69), u7::new(80)));
    }
}

mod stream {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn reader_pushes_each_message_once() {
        let mut reader = Reader::new(Vec::<Message>::new());
        assert_eq!(reader.read(&[0x90, 69, 80, 72, 90, 0xF6, 0xF8]), Ok(3));
        let msgs = reader.into_sink();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[2].status(), Status::TimingClock);
    }

    #[test]
    fn reader_decorates() {
        let sink: Vec<Message<MessageClass>> = Vec::new();
        let mut reader = Reader::new(sink).with_decorator(|msg: &Message| msg.status().class());
        reader.read(&[0xF8, 0xF0, 0xF7, 0xC0, 1]).unwrap();
        let classes = reader
            .sink()
            .iter()
            .map(|msg| *msg.meta())
            .collect::<Vec<_>>();
        assert_eq!(
            classes,
            vec![
                MessageClass::SystemRealtime,
                MessageClass::SystemExclusive,
                MessageClass::Channel,
            ]
        );
    }

    #[test]
    fn reader_channel_sink() {
        let (tx, rx) = message_channel();
        let mut reader = Reader::new(tx);
        reader.read(&[0xF8, 0xB0, 71, 22]).unwrap();
        let msgs = rx.try_iter().collect::<Vec<_>>();
        assert_eq!(
            msgs,
            vec![
                Message::realtime(RealtimeStatus::TimingClock),
                Message::control_change(ch(1), u7::new(71), u7::new(22)),
            ]
        );

        drop(rx);
        assert_eq!(reader.read(&[0xFC]), Ok(1));
    }

    #[test]
    fn reader_partial_failure() {
        let mut reader = Reader::new(Vec::<Message>::new());
        assert!(reader.read(&[0x90, 60, 100, 0x80, 60]).is_err());
        assert_eq!(reader.sink().len(), 1);
    }

    #[test]
    fn filtered_and_fn_sinks() {
        let mut reader = Reader::new(Filtered::new(Status::NoteOn, Vec::<Message>::new()));
        reader.read(&[0x90, 60, 1, 0xF8, 0x80, 60, 0, 0x90, 61, 1]).unwrap();
        let notes = reader.into_sink().into_inner();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|msg| msg.status() == Status::NoteOn));

        let mut seen = Vec::new();
        {
            let mut reader = Reader::new(FnSink(|msg: Message| seen.push(msg.status())));
            reader.read(&[0xFE, 0xFF]).unwrap();
        }
        assert_eq!(seen, vec![Status::ActiveSensing, Status::SystemReset]);
    }

    #[test]
    fn reader_notifies_observers() {
        let observers = Observers::new();
        let clocks = Arc::new(AtomicUsize::new(0));
        let counter = clocks.clone();
        observers.subscribe(RealtimeStatus::TimingClock, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut reader = Reader::new(Vec::<Message>::new()).with_observers(observers);
        reader
            .read(&[0xF8, 0x90, 60, 1, 0xF8, 61, 2, 0xFA, 0xF8])
            .unwrap();
        assert_eq!(clocks.load(Ordering::SeqCst), 3);
        assert_eq!(reader.sink().len(), 5);
    }

    #[test]
    fn reader_notifies_interleaved_realtime() {
        let observers = Observers::new();
        let clocks = Arc::new(AtomicUsize::new(0));
        let counter = clocks.clone();
        observers.subscribe(RealtimeStatus::TimingClock, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut reader = Reader::new(Vec::<Message>::new()).with_observers(observers);
        assert_eq!(reader.read(&[0x90, 60, 0xF8, 100]), Ok(2));
        assert_eq!(clocks.load(Ordering::SeqCst), 1);
        assert_eq!(reader.sink()[0].status(), Status::TimingClock);
        assert_eq!(reader.sink()[1].status(), Status::NoteOn);
    }

    #[test]
    fn writer_publish() {
        let msg = Message::note_on(ch(1), u7::new(60), u7::new(64));

        let mut writer = Writer::new(Vec::<Message>::new());
        assert_eq!(writer.write(&msg), Ok(vec![0x90, 60, 64]));
        assert!(writer.sink().is_empty());

        let mut writer =
            Writer::with_options(Vec::<Message>::new(), WriterOptions { publish: true });
        assert_eq!(writer.write(&msg), Ok(vec![0x90, 60, 64]));
        assert!(writer
            .write(&Message::system(Status::TuneRequest).unwrap())
            .is_err());
        assert_eq!(writer.into_sink(), vec![msg]);
    }
}

mod realtime {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn registration_order_and_unsubscribe() {
        let observers = Observers::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let subs = (1..=3)
            .map(|id| {
                let log = log.clone();
                let status = if id == 3 {
                    RealtimeStatus::Stop
                } else {
                    RealtimeStatus::Start
                };
                observers.subscribe(status, move |status| log.lock().push((id, status)))
            })
            .collect::<Vec<_>>();

        assert_eq!(observers.notify(RealtimeStatus::Start), 2);
        assert_eq!(
            *log.lock(),
            vec![(1, RealtimeStatus::Start), (2, RealtimeStatus::Start)]
        );

        assert!(subs[0].unsubscribe());
        assert!(!subs[0].unsubscribe());
        assert_eq!(observers.handler_count(RealtimeStatus::Start), 1);
        assert_eq!(observers.handler_count(RealtimeStatus::Stop), 1);
        assert_eq!(observers.notify(RealtimeStatus::Continue), 0);

        log.lock().clear();
        assert_eq!(observers.notify(RealtimeStatus::Start), 1);
        assert_eq!(*log.lock(), vec![(2, RealtimeStatus::Start)]);
    }

    #[test]
    fn handler_unsubscribes_itself() {
        let observers = Observers::new();
        let calls = Arc::new(Mutex::new(0));
        let own: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let sub = {
            let calls = calls.clone();
            let own = own.clone();
            observers.subscribe(RealtimeStatus::Stop, move |_| {
                *calls.lock() += 1;
                if let Some(sub) = own.lock().take() {
                    assert!(sub.unsubscribe());
                }
            })
        };
        *own.lock() = Some(sub);

        assert_eq!(observers.notify(RealtimeStatus::Stop), 1);
        assert_eq!(observers.handler_count(RealtimeStatus::Stop), 0);
        assert_eq!(observers.notify(RealtimeStatus::Stop), 0);
        assert_eq!(*calls.lock(), 1);
    }

    #[test]
    fn handler_subscribes_during_notify() {
        let observers = Observers::new();
        let registry = observers.clone();
        observers.subscribe(RealtimeStatus::Start, move |status| {
            registry.subscribe(status, |_| {});
        });
        assert_eq!(observers.notify(RealtimeStatus::Start), 1);
        assert_eq!(observers.handler_count(RealtimeStatus::Start), 2);
        assert_eq!(observers.notify(RealtimeStatus::Start), 2);
        assert_eq!(observers.handler_count(RealtimeStatus::Start), 3);
    }

    #[test]
    fn unsubscribe_after_drop() {
        let observers = Observers::new();
        let sub = observers.subscribe(RealtimeStatus::SystemReset, |_| {});
        assert_eq!(sub.status(), RealtimeStatus::SystemReset);
        drop(observers);
        assert!(!sub.unsubscribe());
    }
}

mod factory {
    use super::*;

    #[test]
    fn channel_factory() {
        let first = ChannelFactory::new(ch(1));
        assert_eq!(first.note_on(u7::new(60), u7::new(90)), Ok(vec![0x90, 60, 90]));
        assert_eq!(first.note_on_default(u7::new(60)), Ok(vec![0x90, 60, 64]));
        assert_eq!(first.note_off(u7::new(60)), Ok(vec![0x80, 60, 0]));
        assert_eq!(
            first.control_change(u7::new(7), u7::new(100)),
            Ok(vec![0xB0, 7, 100])
        );
        assert_eq!(first.bank_select_msb(u7::new(5)), Ok(vec![0xB0, 0, 5]));
        assert_eq!(first.bank_select_lsb(u7::new(5)), Ok(vec![0xB0, 32, 5]));

        let last = ChannelFactory::new(ch(16));
        assert_eq!(last.channel(), ch(16));
        assert_eq!(last.program_change(u7::new(3)), Ok(vec![0xCF, 3]));
    }
}

mod parallel {
    use super::*;

    #[test]
    fn independent_streams() {
        let streams: [&[u8]; 3] = [&[0x90, 60, 100, 61, 101], &[0xB2, 7, 10], &[61, 1]];
        let results = decode_streams(&streams);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().map(Vec::len), Ok(2));
        assert_eq!(
            results[1],
            Ok(vec![Message::control_change(ch(3), u7::new(7), u7::new(10))])
        );
        assert_eq!(
            results[2],
            Err(Error::NoRunningStatus { offset: 0, byte: 61 })
        );
    }
}
