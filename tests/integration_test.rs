use std::io::{self, BufReader, Read};
use std::sync::Once;
use std::thread;

use endless_stream::{
    BufferFactory, CircularStream, GeneratorConfig, HeaderFormat,
    SharedBuffer, StreamSource,
};

static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[test]
fn stream_prefix_decodes_as_image() {
    initialize();
    let source = StreamSource::new(&GeneratorConfig::default()).unwrap();
    let header_len = source.buffer().header_len();
    assert!(header_len > 0);

    let mut stream = source.stream(header_len as u64);
    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes).unwrap();

    let image = image::load_from_memory(&bytes).expect("not an image");
    assert_eq!((image.width(), image.height()), (1, 1));
}

#[test]
fn io_copy_drains_declared_size() {
    initialize();
    let buffer = BufferFactory::new(4096).unwrap().build();
    let declared = 4096 * 3 + 17;
    let mut stream = BufReader::new(CircularStream::new(buffer, declared));

    let copied = io::copy(&mut stream, &mut io::sink()).unwrap();
    assert_eq!(copied, declared);
}

#[test]
fn streams_share_buffer_across_threads() {
    initialize();
    let config = GeneratorConfig {
        buffer_capacity: 1000,
        header_format: HeaderFormat::Bmp,
    };
    let source = StreamSource::new(&config).unwrap();
    let expected: Vec<u8> = source
        .buffer()
        .as_bytes()
        .iter()
        .copied()
        .cycle()
        .take(2500)
        .collect();

    let handles: Vec<_> = (1..=4)
        .map(|chunk| {
            let mut stream = source.stream(2500);
            thread::spawn(move || {
                let mut output = Vec::new();
                let mut buf = vec![0u8; chunk * 97];
                loop {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    output.extend_from_slice(&buf[..n]);
                }
                output
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn process_buffer_is_shared_between_threads() {
    initialize();
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(SharedBuffer::process_default))
        .collect();
    let buffers: Vec<SharedBuffer> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    for buffer in &buffers[1..] {
        assert_eq!(buffer.as_bytes(), buffers[0].as_bytes());
    }
}

#[test]
fn stream_larger_than_u32_reports_remaining() {
    initialize();
    let declared = 5 * 1024 * 1024 * 1024u64;
    let mut stream = StreamSource::default().stream(declared);
    let mut chunk = vec![0u8; 1024];

    stream.read_exact(&mut chunk).unwrap();
    assert_eq!(stream.bytes_remaining(), declared - 1024);
}
