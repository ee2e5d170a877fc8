use std::sync::Arc;
use std::thread;

use super::EvaluationQueue;
use crate::model::{EvaluationRequest, Metadata};

fn request(tag: &str) -> EvaluationRequest {
    EvaluationRequest {
        system_prompt: String::new(),
        user_prompt: String::new(),
        response: tag.to_string(),
        evaluator: "dummy".to_string(),
        metadata: Metadata::new(),
        user_id: "user-1".to_string(),
        async_mode: true,
    }
}

#[test]
fn test_fifo_ordering() {
    let queue = EvaluationQueue::new();
    queue.enqueue(request("a"));
    queue.enqueue(request("b"));
    queue.enqueue(request("c"));

    assert_eq!(queue.len(), 3);
    assert_eq!(queue.dequeue().unwrap().response, "a");
    assert_eq!(queue.dequeue().unwrap().response, "b");
    assert_eq!(queue.dequeue().unwrap().response, "c");
    assert!(queue.dequeue().is_none());
    assert!(queue.is_empty());
}

#[test]
fn test_dequeue_empty_returns_none() {
    let queue = EvaluationQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert!(queue.dequeue().is_none());
}

#[test]
fn test_concurrent_producers_single_consumer() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 100;

    let queue = Arc::new(EvaluationQueue::new());

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    queue.enqueue(request(&format!("{p}-{i}")));
                }
            })
        })
        .collect();

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut drained = Vec::new();
            while drained.len() < PRODUCERS * PER_PRODUCER {
                if let Some(req) = queue.dequeue() {
                    drained.push(req.response);
                } else {
                    thread::yield_now();
                }
            }
            drained
        })
    };

    for producer in producers {
        producer.join().unwrap();
    }
    let drained = consumer.join().unwrap();

    assert_eq!(drained.len(), PRODUCERS * PER_PRODUCER);
    assert!(queue.is_empty());

    // Per-producer FIFO: each producer's items come out in the order it
    // enqueued them, even when interleaved with other producers.
    for p in 0..PRODUCERS {
        let prefix = format!("{p}-");
        let positions: Vec<usize> = drained
            .iter()
            .filter(|tag| tag.starts_with(&prefix))
            .map(|tag| tag[prefix.len()..].parse::<usize>().unwrap())
            .collect();
        assert_eq!(positions, (0..PER_PRODUCER).collect::<Vec<_>>());
    }
}
