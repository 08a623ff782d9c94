//! Integration tests for stream round-trips and size contracts.

use std::io::Cursor;
use std::rc::Rc;

use animstream::prelude::*;

/// Build a populated UV animation for round-trip checks.
fn uv_animation(
    registry: &InterpolatorRegistry,
    type_tag: i32,
    name: &str,
    num_frames: i32,
) -> Animation {
    let info = *registry.find(type_tag).expect("tag registered");
    let mut anim = Animation::new(info, num_frames, 0x4, 2.5).expect("valid frame count");

    let custom = anim.uv_custom_mut().unwrap();
    custom.name = AnimName::new(name);
    custom.node_to_channel = [0, 1, 0, 1, 0, 0, 0, 0];

    let frames = anim.uv_frames_mut().unwrap();
    for (i, frame) in frames.iter_mut().enumerate() {
        frame.time = i as f32 * 0.5;
        frame.uv = [
            i as f32 * 0.1,
            i as f32 * 0.2,
            0.0,
            1.0,
            -0.5,
            i as f32,
        ];
        frame.prev = i.saturating_sub(1) as i32;
    }
    anim
}

/// Build a populated skeletal animation.
fn hier_animation(registry: &InterpolatorRegistry, num_frames: i32) -> Animation {
    let info = *registry.find(TAG_HIERARCHICAL).expect("tag registered");
    let mut anim = Animation::new(info, num_frames, 0, 1.0).expect("valid frame count");

    let frames = anim.hier_frames_mut().unwrap();
    for (i, frame) in frames.iter_mut().enumerate() {
        *frame = HierKeyFrame {
            rotation: [0.0, 0.0, i as f32 * 0.25, 1.0],
            translation: [i as f32, 0.0, -(i as f32)],
            time: i as f32 / 30.0,
            prev: i.saturating_sub(1) as i32,
        };
    }
    anim
}

#[test]
fn test_uv_roundtrip() {
    let registry = InterpolatorRegistry::with_builtin_formats();
    let anim = uv_animation(&registry, TAG_UV_LINEAR, "wave", 3);

    let mut buf = Vec::new();
    {
        let mut out = OStream::new(&mut buf);
        anim.stream_write(&mut out).expect("write");
    }

    let mut cursor = Cursor::new(buf);
    let mut input = IStream::new(&mut cursor);
    let header = input.find_chunk(ID_ANIM_ANIMATION).expect("chunk");
    assert_eq!(header.size, anim.stream_size());

    let read = Animation::stream_read(&mut input, &registry).expect("read");
    assert_eq!(read.type_tag(), TAG_UV_LINEAR);
    assert_eq!(read.num_frames(), anim.num_frames());
    assert_eq!(read.flags(), anim.flags());
    assert_eq!(read.duration(), anim.duration());
    assert_eq!(read.keyframe_bytes(), anim.keyframe_bytes());
    assert_eq!(read.custom_data_bytes(), anim.custom_data_bytes());
}

#[test]
fn test_hierarchical_roundtrip() {
    let registry = InterpolatorRegistry::with_builtin_formats();
    let anim = hier_animation(&registry, 4);

    let mut buf = Vec::new();
    {
        let mut out = OStream::new(&mut buf);
        anim.stream_write(&mut out).expect("write");
    }

    let mut cursor = Cursor::new(buf);
    let mut input = IStream::new(&mut cursor);
    input.find_chunk(ID_ANIM_ANIMATION).expect("chunk");

    let read = Animation::stream_read(&mut input, &registry).expect("read");
    assert_eq!(read.type_tag(), TAG_HIERARCHICAL);
    assert_eq!(read.hier_frames().unwrap(), anim.hier_frames().unwrap());
}

#[test]
fn test_legacy_roundtrip_without_uv_tags() {
    // Legacy streams decode through the fixed hierarchical tag alone.
    let mut registry = InterpolatorRegistry::new();
    registry
        .register(InterpolatorInfo {
            type_tag: TAG_HIERARCHICAL,
            format: KeyframeFormat::Hierarchical,
        })
        .expect("register");

    let anim = hier_animation(&registry, 3);
    let mut buf = Vec::new();
    {
        let mut out = OStream::new(&mut buf);
        anim.stream_write_legacy(&mut out).expect("write");
    }
    // No chunk framing, no version marker, no type tag.
    assert_eq!(buf.len(), 12 + 3 * 36);

    let mut cursor = Cursor::new(buf);
    let mut input = IStream::new(&mut cursor);
    let read = Animation::stream_read_legacy(&mut input, &registry).expect("read");
    assert_eq!(read.num_frames(), 3);
    assert_eq!(read.flags(), anim.flags());
    assert_eq!(read.duration(), anim.duration());
    assert_eq!(read.hier_frames().unwrap(), anim.hier_frames().unwrap());
}

#[test]
fn test_size_contract_every_format() {
    let registry = InterpolatorRegistry::with_builtin_formats();
    let animations = [
        uv_animation(&registry, TAG_UV_LINEAR, "linear", 3),
        uv_animation(&registry, TAG_UV_PARAM, "param", 5),
        hier_animation(&registry, 2),
    ];

    for anim in &animations {
        let mut buf = Vec::new();
        {
            let mut out = OStream::new(&mut buf);
            anim.stream_write(&mut out).expect("write");
        }
        // Declared payload size plus the 12-byte chunk header.
        assert_eq!(
            buf.len() as u32,
            12 + anim.stream_size(),
            "size contract broken for tag 0x{:X}",
            anim.type_tag()
        );
    }
}

#[test]
fn test_dictionary_roundtrip() {
    let registry = InterpolatorRegistry::with_builtin_formats();
    let mut dict = UvAnimDictionary::new();
    dict.add(Rc::new(uv_animation(&registry, TAG_UV_LINEAR, "wave", 3)));
    dict.add(Rc::new(uv_animation(&registry, TAG_UV_LINEAR, "scroll", 2)));

    let mut buf = Vec::new();
    {
        let mut out = OStream::new(&mut buf);
        dict.stream_write(&mut out).expect("write");
    }

    // Declared size: struct header + count, then each member framed.
    // wave: 20 + (4 + 32 + 32 + 3*32) = 184; scroll: 20 + (4 + 32 + 32 + 2*32) = 152.
    let expected: u32 = 16 + (12 + 184) + (12 + 152);
    assert_eq!(dict.stream_size(), expected);
    assert_eq!(buf.len() as u32, 12 + expected);

    let mut cursor = Cursor::new(buf);
    let mut input = IStream::new(&mut cursor);
    let header = input.find_chunk(ID_UV_ANIM_DICT).expect("outer chunk");
    assert_eq!(header.size, expected);

    let read = UvAnimDictionary::stream_read(&mut input, &registry).expect("read");
    assert_eq!(read.len(), 2);

    let wave = read.find("WAVE").expect("case-insensitive hit");
    assert_eq!(wave.num_frames(), 3);
    let scroll = read.find("Scroll").expect("case-insensitive hit");
    assert_eq!(scroll.num_frames(), 2);
}

#[test]
fn test_dictionary_file_roundtrip() {
    use std::fs::File;
    use std::io::BufReader;

    let registry = InterpolatorRegistry::with_builtin_formats();
    let mut dict = UvAnimDictionary::new();
    dict.add(Rc::new(uv_animation(&registry, TAG_UV_PARAM, "ripple", 4)));

    let temp = tempfile::NamedTempFile::new().expect("temp file");
    {
        let mut file = File::create(temp.path()).expect("create");
        let mut out = OStream::new(&mut file);
        dict.stream_write(&mut out).expect("write");
        out.flush().expect("flush");
    }

    let file = File::open(temp.path()).expect("open");
    let mut reader = BufReader::new(file);
    let mut input = IStream::new(&mut reader);
    input.find_chunk(ID_UV_ANIM_DICT).expect("outer chunk");
    let read = UvAnimDictionary::stream_read(&mut input, &registry).expect("read");

    assert_eq!(read.len(), 1);
    let ripple = read.find("ripple").expect("found");
    assert_eq!(ripple.type_tag(), TAG_UV_PARAM);
    assert_eq!(ripple.num_frames(), 4);
}

#[test]
fn test_dictionary_read_aborts_on_missing_member() {
    let registry = InterpolatorRegistry::with_builtin_formats();

    // Declare two animations but provide only one.
    let mut buf = Vec::new();
    {
        let mut out = OStream::new(&mut buf);
        out.write_chunk_header(ID_STRUCT, 4).unwrap();
        out.write_i32(2).unwrap();
        uv_animation(&registry, TAG_UV_LINEAR, "only", 1)
            .stream_write(&mut out)
            .expect("write");
    }

    let mut cursor = Cursor::new(buf);
    let mut input = IStream::new(&mut cursor);
    let err = UvAnimDictionary::stream_read(&mut input, &registry).unwrap_err();
    assert!(matches!(
        err,
        Error::ChunkNotFound { expected } if expected == ID_ANIM_ANIMATION
    ));
}

#[test]
fn test_dictionary_read_aborts_on_unknown_tag() {
    let registry = InterpolatorRegistry::with_builtin_formats();
    let anim = uv_animation(&registry, TAG_UV_PARAM, "odd", 1);

    let mut buf = Vec::new();
    {
        let mut out = OStream::new(&mut buf);
        out.write_chunk_header(ID_STRUCT, 4).unwrap();
        out.write_i32(1).unwrap();
        anim.stream_write(&mut out).expect("write");
    }

    // A reader whose registry never learned the param tag must fail the
    // whole dictionary, not dereference a missing format.
    let mut poor_registry = InterpolatorRegistry::new();
    poor_registry
        .register(InterpolatorInfo {
            type_tag: TAG_UV_LINEAR,
            format: KeyframeFormat::Uv,
        })
        .unwrap();

    let mut cursor = Cursor::new(buf);
    let mut input = IStream::new(&mut cursor);
    let err = UvAnimDictionary::stream_read(&mut input, &poor_registry).unwrap_err();
    assert!(matches!(err, Error::UnknownFormat(t) if t == TAG_UV_PARAM));
}
