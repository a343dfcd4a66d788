mod tests {
    use myrtio_adalight::frame::{FrameHeader, HEADER_LEN, MAX_LEDS, frame_len};
    use myrtio_adalight::gamma::{ToneCurve, ws2812_lut};
    use myrtio_adalight::{ChannelOrder, EncodeError, EncoderConfig, FrameEncoder, Rgb, ToneMode};

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const GRAY: Rgb = Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    fn encoder(tone: ToneMode) -> FrameEncoder {
        FrameEncoder::new(&EncoderConfig {
            tone,
            channel_order: ChannelOrder::Rgb,
        })
    }

    fn encode_vec(encoder: &FrameEncoder, colors: &[Rgb]) -> Vec<u8> {
        let mut out = vec![0; frame_len(colors.len())];
        let len = encoder.encode_into(colors, &mut out).unwrap();
        assert_eq!(len, out.len());
        out
    }

    fn gradient(len: usize) -> Vec<Rgb> {
        (0..len)
            .map(|i| {
                let v = u8::try_from(i * 64 / len).unwrap();
                Rgb::new(v, v / 2, 63 - v)
            })
            .collect()
    }

    #[test]
    fn test_black_gray_white_at_gamma_2() {
        let frame = encode_vec(&encoder(ToneMode::Gamma(2.0)), &[BLACK, GRAY, WHITE]);
        assert_eq!(
            frame,
            [
                0x41, 0x64, 0x61, 0x00, 0x02, 0x57, //
                0, 0, 0, //
                64, 64, 64, // 64.25: +0.25 carried into the next LED
                255, 255, 255,
            ]
        );
    }

    #[test]
    fn test_single_led() {
        let frame = encode_vec(&FrameEncoder::default(), &[WHITE]);
        assert_eq!(frame.len(), 9);
        assert_eq!(frame[..HEADER_LEN], [0x41, 0x64, 0x61, 0x00, 0x00, 0x55]);
        assert_eq!(frame[HEADER_LEN..], [255, 255, 255]);
    }

    #[test]
    fn test_out_of_range() {
        let encoder = FrameEncoder::default();
        let mut out = [0u8; 16];
        assert_eq!(
            encoder.encode_into(&[], &mut out),
            Err(EncodeError::OutOfRange { count: 0 })
        );

        let too_many = vec![GRAY; MAX_LEDS + 1];
        assert_eq!(
            encoder.encode_into(&too_many, &mut out),
            Err(EncodeError::OutOfRange { count: 65_537 })
        );
        assert_eq!(
            encoder.encode::<16>(&[]),
            Err(EncodeError::OutOfRange { count: 0 })
        );
    }

    #[test]
    fn test_max_leds() {
        let colors = vec![GRAY; MAX_LEDS];
        let frame = encode_vec(&FrameEncoder::default(), &colors);
        assert_eq!(frame.len(), 6 + 3 * 65_536);
        assert_eq!(frame[3..HEADER_LEN], [0xFF, 0xFF, 0x55]);
    }

    #[test]
    fn test_length_and_header() {
        let encoder = FrameEncoder::default();
        for count in [1, 2, 3, 50, 156, 255, 256, 257, 1000] {
            let colors = gradient(count);
            let frame = encode_vec(&encoder, &colors);
            assert_eq!(frame.len(), 6 + 3 * count);
            assert_eq!(frame[5], frame[3] ^ frame[4] ^ 0x55);
            assert_eq!(FrameHeader::parse(&frame).unwrap().led_count(), count);
        }
    }

    #[test]
    fn test_buffer_too_small() {
        let encoder = FrameEncoder::default();
        let mut out = [0u8; 8];
        assert_eq!(
            encoder.encode_into(&[GRAY], &mut out),
            Err(EncodeError::BufferTooSmall {
                required: 9,
                available: 8
            })
        );
        assert_eq!(
            encoder.encode::<11>(&[GRAY, GRAY]),
            Err(EncodeError::BufferTooSmall {
                required: 12,
                available: 11
            })
        );
    }

    #[test]
    fn test_extra_buffer_is_untouched() {
        let encoder = encoder(ToneMode::Linear);
        let mut out = [0xEE; 12];
        assert_eq!(encoder.encode_into(&[Rgb::new(1, 2, 3)], &mut out), Ok(9));
        assert_eq!(out[6..], [1, 2, 3, 0xEE, 0xEE, 0xEE]);
    }

    #[test]
    fn test_deterministic() {
        let encoder = FrameEncoder::default();
        let colors = gradient(300);
        let first = encode_vec(&encoder, &colors);
        let second = encode_vec(&encoder, &colors);
        assert_eq!(first, second);

        // A different frame in between must not leak residual error
        encode_vec(&encoder, &[GRAY; 7]);
        assert_eq!(encode_vec(&encoder, &colors), first);
    }

    #[test]
    fn test_diffusion_dithers_flat_color() {
        let encoder = encoder(ToneMode::Gamma(2.0));
        let frame = encode_vec(&encoder, &[GRAY; 4]);
        assert_eq!(frame[HEADER_LEN..], [64, 64, 64, 65, 65, 65, 64, 64, 64, 64, 64, 64]);
    }

    #[test]
    fn test_prefix_sums_track_curve() {
        let curve = ToneCurve::new(2.2);
        let encoder = FrameEncoder::with_curve(curve.clone(), ChannelOrder::Rgb);
        for len in [10, 97, 1000, 5000] {
            let colors = gradient(len);
            let frame = encode_vec(&encoder, &colors);

            let mut target_sum = [0.0f64; 3];
            let mut output_sum = [0.0f64; 3];
            for (color, led) in colors.iter().zip(frame[HEADER_LEN..].chunks_exact(3)) {
                let targets = [curve.correct(color.r), curve.correct(color.g), curve.correct(color.b)];
                for channel in 0..3 {
                    target_sum[channel] += targets[channel];
                    output_sum[channel] += f64::from(led[channel]);
                    assert!((output_sum[channel] - target_sum[channel]).abs() <= 0.5 + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_diffusion_beats_plain_rounding() {
        let curve = ToneCurve::new(2.8);
        let encoder = FrameEncoder::with_curve(curve.clone(), ChannelOrder::Rgb);
        let colors = vec![Rgb::new(40, 40, 40); 64];
        let frame = encode_vec(&encoder, &colors);

        let target = curve.correct(40) * 64.0;
        let diffused: f64 = frame[HEADER_LEN..].iter().step_by(3).map(|b| f64::from(*b)).sum();
        let rounded = f64::from(curve.correct8(40)) * 64.0;
        assert!((diffused - target).abs() <= 0.5 + 1e-6);
        assert!((diffused - target).abs() < (rounded - target).abs());
    }

    #[test]
    fn test_table_mode_matches_lookup() {
        let encoder = encoder(ToneMode::Ws2812Table);
        let colors = gradient(200);
        let frame = encode_vec(&encoder, &colors);
        for (color, led) in colors.iter().zip(frame[HEADER_LEN..].chunks_exact(3)) {
            assert_eq!(led, [ws2812_lut(color.r), ws2812_lut(color.g), ws2812_lut(color.b)]);
        }
    }

    #[test]
    fn test_channel_order() {
        let color = Rgb::new(10, 200, 30);
        let cases = [
            (ChannelOrder::Rgb, [10, 200, 30]),
            (ChannelOrder::Grb, [200, 10, 30]),
            (ChannelOrder::Bgr, [30, 200, 10]),
            (ChannelOrder::Brg, [30, 10, 200]),
        ];
        for (order, expected) in cases {
            let encoder = FrameEncoder::new(&EncoderConfig {
                tone: ToneMode::Linear,
                channel_order: order,
            });
            let frame = encode_vec(&encoder, &[color]);
            assert_eq!(frame[HEADER_LEN..], expected, "{}", order.as_str());
        }
        assert_eq!(ChannelOrder::parse_from_str("grb"), Some(ChannelOrder::Grb));
        assert_eq!(ChannelOrder::parse_from_str("rgbw"), None);
    }

    #[test]
    fn test_heapless_and_iter_match_slice() {
        let encoder = FrameEncoder::default();
        let colors = gradient(40);
        let expected = encode_vec(&encoder, &colors);

        let buffer = encoder.encode::<256>(&colors).unwrap();
        assert_eq!(buffer[..], expected[..]);

        let mut buffer = heapless::Vec::<u8, 256>::new();
        encoder.encode_iter(colors.iter().copied(), &mut buffer).unwrap();
        assert_eq!(buffer[..], expected[..]);

        assert_eq!(
            encoder.encode_iter(core::iter::empty(), &mut buffer),
            Err(EncodeError::OutOfRange { count: 0 })
        );
        assert_eq!(
            encoder.encode_iter(colors.iter().copied(), &mut heapless::Vec::<u8, 64>::new()),
            Err(EncodeError::BufferTooSmall {
                required: 66,
                available: 64
            })
        );
    }
}
