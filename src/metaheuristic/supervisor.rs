use crate::metaheuristic::colony::{Layer, Message, MessageInfo};

use csv::Writer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};

/// One csv row: a colony's statistics over `aggregation_rate` iterations.
#[derive(Debug, Serialize)]
struct Row {
    layer: Layer,
    channel: usize,
    first_iteration: usize,
    iterations: usize,
    ants: usize,
    successes: usize,
    steps: usize,
    best_length: Option<f64>,
    metric: f64,
    cpu_time_us: u64,
}

/// Collects the messages colonies send after every iteration and writes them as csv.
pub struct Supervisor<W: Write> {
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    messages: BTreeMap<(Layer, usize, usize), MessageInfo>,
    aggregation_rate: usize,
    writer: Writer<W>,
}

impl<W: Write> Supervisor<W> {
    pub fn new(aggregation_rate: usize, writer: Writer<W>) -> Self {
        let (tx, rx) = mpsc::channel();
        Supervisor {
            sender: tx,
            receiver: rx,
            messages: BTreeMap::new(),
            aggregation_rate: aggregation_rate.max(1),
            writer,
        }
    }

    /// A sender to hand to a colony.
    pub fn sender(&self) -> Sender<Message> {
        self.sender.clone()
    }

    /// Drains all messages sent so far and adds them to their bins.
    /// Returns the number of messages received.
    pub fn aggregate_receive(&mut self) -> usize {
        let mut received = 0;
        while let Ok(message) = self.receiver.try_recv() {
            let bin = message.iteration / self.aggregation_rate;
            *self
                .messages
                .entry((message.layer, message.channel, bin))
                .or_insert_with(MessageInfo::default) += message.get_info();
            received += 1;
        }
        received
    }

    /// Writes every aggregated bin, ordered by layer, channel and iteration, and forgets them.
    pub fn write_rows(&mut self) -> Result<(), Box<dyn Error>> {
        self.aggregate_receive();
        let messages = std::mem::take(&mut self.messages);
        for ((layer, channel, bin), info) in messages {
            self.writer.serialize(Row {
                layer,
                channel,
                first_iteration: bin * self.aggregation_rate,
                iterations: info.iterations,
                ants: info.ants,
                successes: info.successes,
                steps: info.steps,
                best_length: info.best_length,
                metric: info.metric,
                cpu_time_us: info.cpu_time_us,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn message(layer: Layer, channel: usize, iteration: usize, successes: usize) -> Message {
        Message::new(
            layer,
            channel,
            iteration,
            10,
            successes,
            20,
            None,
            successes as f64 / 10.0,
            Duration::from_micros(3),
        )
    }

    #[test]
    fn messages_are_binned() {
        let mut supervisor = Supervisor::new(2, Writer::from_writer(Vec::new()));
        let sender = supervisor.sender();
        for iteration in 0..3 {
            sender.send(message(Layer::Graph, 0, iteration, iteration)).unwrap();
        }
        sender.send(message(Layer::Graph, 1, 0, 4)).unwrap();

        assert_eq!(supervisor.aggregate_receive(), 4);
        assert_eq!(supervisor.messages[&(Layer::Graph, 0, 0)].successes, 1);
        assert_eq!(supervisor.messages[&(Layer::Graph, 0, 0)].iterations, 2);
        assert_eq!(supervisor.messages[&(Layer::Graph, 0, 1)].successes, 2);
        assert_eq!(supervisor.messages[&(Layer::Graph, 1, 0)].ants, 10);
    }

    #[test]
    fn equal_channels_of_different_layers_stay_apart() {
        let mut supervisor = Supervisor::new(1, Writer::from_writer(Vec::new()));
        let sender = supervisor.sender();
        sender.send(message(Layer::Graph, 0, 0, 2)).unwrap();
        sender.send(message(Layer::Meta, 0, 0, 7)).unwrap();

        assert_eq!(supervisor.aggregate_receive(), 2);
        assert_eq!(supervisor.messages[&(Layer::Graph, 0, 0)].successes, 2);
        assert_eq!(supervisor.messages[&(Layer::Meta, 0, 0)].successes, 7);
        assert_eq!(supervisor.messages[&(Layer::Meta, 0, 0)].iterations, 1);
    }

    #[test]
    fn rows_are_written() {
        let mut supervisor = Supervisor::new(1, Writer::from_writer(Vec::new()));
        let sender = supervisor.sender();
        sender.send(message(Layer::Graph, 3, 0, 5)).unwrap();
        sender.send(message(Layer::Meta, 0, 0, 1)).unwrap();
        supervisor.write_rows().unwrap();

        let data = String::from_utf8(supervisor.writer.into_inner().unwrap()).unwrap();
        let mut lines = data.lines();
        assert_eq!(
            lines.next(),
            Some("layer,channel,first_iteration,iterations,ants,successes,steps,best_length,metric,cpu_time_us")
        );
        assert_eq!(lines.next(), Some("graph,3,0,1,10,5,20,,0.5,3"));
        assert_eq!(lines.next(), Some("meta,0,0,1,10,1,20,,0.1,3"));
    }
}
