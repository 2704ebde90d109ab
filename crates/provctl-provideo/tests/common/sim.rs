//! A simulated ProVideo device behind a scripted transport.
//!
//! Parses each complete command line, enforces per-field ranges, keeps the
//! stored values and a bounded defect pixel table, and answers in small
//! chunks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use provctl_channel::testing::ScriptedTransport;

struct Entry {
    values: Vec<i64>,
    ranges: Vec<(i64, i64)>,
    chained: bool,
    read_only: bool,
}

struct State {
    entries: HashMap<&'static str, Entry>,
    phases: HashMap<i64, (i64, i64)>,
    dpc: Vec<(i64, i64)>,
    dpc_capacity: usize,
    inbox: Vec<u8>,
    silent: bool,
    received: Vec<String>,
}

#[derive(Clone)]
pub struct SimDevice {
    state: Arc<Mutex<State>>,
}

const ACTIONS: &[&str] = &[
    "save_settings",
    "load_settings",
    "reset_settings",
    "reboot",
    "dpc_clear",
    "dpc_save",
    "dpc_load",
];

impl SimDevice {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        let mut add = |name: &'static str,
                       values: Vec<i64>,
                       ranges: Vec<(i64, i64)>,
                       chained: bool,
                       read_only: bool| {
            entries.insert(
                name,
                Entry {
                    values,
                    ranges,
                    chained,
                    read_only,
                },
            );
        };

        add("version", vec![1, 4, 2], vec![], false, true);
        add("temp", vec![41, 70], vec![], false, true);
        add("runtime", vec![86_400], vec![], false, true);
        add("cam_info", vec![0, 1023, 10, 40_000], vec![], false, true);
        add("fan", vec![50], vec![(0, 100)], false, false);
        add("cam_gain", vec![100], vec![(0, 1023)], false, false);
        add("cam_exposure", vec![20_000], vec![(10, 40_000)], false, false);
        add("cproc_bright", vec![0], vec![(-127, 127)], true, false);
        add("cproc_hue", vec![0], vec![(-90, 90)], true, false);
        add(
            "knee",
            vec![0, 80, 100, 100],
            vec![(0, 1), (0, 100), (0, 1000), (0, 1000)],
            true,
            false,
        );
        add(
            "osd_zebra",
            vec![0, 900, 1023],
            vec![(0, 2), (0, 1023), (0, 1023)],
            false,
            false,
        );
        add("lens_focus_pos", vec![0], vec![(-50_000, 50_000)], false, false);
        add("dpc", vec![0], vec![(0, 1)], false, false);

        Self {
            state: Arc::new(Mutex::new(State {
                entries,
                phases: HashMap::new(),
                dpc: Vec::new(),
                dpc_capacity: 16,
                inbox: Vec::new(),
                silent: false,
                received: Vec::new(),
            })),
        }
    }

    /// A transport wired to this device, delivering `chunk` bytes per poll.
    pub fn transport(&self, chunk: usize) -> ScriptedTransport {
        let transport = ScriptedTransport::new();
        let device = self.clone();
        transport
            .set_chunk_size(chunk)
            .set_idle_polls(1)
            .respond_with(move |sent| device.receive(sent));
        transport
    }

    pub fn set_dpc_capacity(&self, capacity: usize) {
        self.lock().dpc_capacity = capacity;
    }

    pub fn set_silent(&self, silent: bool) {
        self.lock().silent = silent;
    }

    pub fn value(&self, name: &str) -> Vec<i64> {
        self.lock()
            .entries
            .get(name)
            .map(|e| e.values.clone())
            .unwrap_or_default()
    }

    pub fn dpc_pixels(&self) -> Vec<(i64, i64)> {
        self.lock().dpc.clone()
    }

    /// Command lines received so far.
    pub fn received(&self) -> Vec<String> {
        self.lock().received.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn receive(&self, bytes: &[u8]) -> Vec<u8> {
        let mut state = self.lock();
        state.inbox.extend_from_slice(bytes);

        let mut out = String::new();
        while let Some(pos) = state.inbox.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = state.inbox.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line).trim().to_string();
            state.received.push(line.clone());
            if !state.silent {
                out.push_str(&state.execute(&line));
            }
        }
        out.into_bytes()
    }
}

impl State {
    fn execute(&mut self, line: &str) -> String {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return "FAIL: empty command\n".to_string();
        };
        let args: Result<Vec<i64>, _> = tokens.map(str::parse::<i64>).collect();
        let Ok(args) = args else {
            return "FAIL: invalid parameter\n".to_string();
        };

        if ACTIONS.contains(&name) {
            if !args.is_empty() {
                return "FAIL: wrong number of parameters\n".to_string();
            }
            if name == "dpc_clear" {
                self.dpc.clear();
            }
            return "OK\n".to_string();
        }

        match name {
            "dpc_add" => self.dpc_add(&args),
            "dpc_table" => {
                let mut out = String::new();
                for (i, (x, y)) in self.dpc.iter().enumerate() {
                    out.push_str(&format!("dpc_pixel {i} {x} {y}\n"));
                }
                out.push_str("OK\n");
                out
            }
            "mcc_phase" => self.mcc_phase(&args),
            _ => self.scalar(name, args),
        }
    }

    fn dpc_add(&mut self, args: &[i64]) -> String {
        let [x, y] = args else {
            return "FAIL: wrong number of parameters\n".to_string();
        };
        if self.dpc.len() >= self.dpc_capacity {
            return "FAIL: table full\n".to_string();
        }
        self.dpc.push((*x, *y));
        "OK\n".to_string()
    }

    fn mcc_phase(&mut self, args: &[i64]) -> String {
        match *args {
            [id] if (0..12).contains(&id) => {
                let (sat, hue) = self.phases.get(&id).copied().unwrap_or((1000, 0));
                format!("mcc_phase {id} {sat} {hue}\nOK\n")
            }
            [id, sat, hue] if (0..12).contains(&id) => {
                self.phases.insert(id, (sat, hue));
                "OK\n".to_string()
            }
            [_] | [_, _, _] => "FAIL: out of range\n".to_string(),
            _ => "FAIL: wrong number of parameters\n".to_string(),
        }
    }

    fn scalar(&mut self, name: &str, mut args: Vec<i64>) -> String {
        let Some(entry) = self.entries.get_mut(name) else {
            return "FAIL: command not supported\n".to_string();
        };
        if args.is_empty() {
            let fields: Vec<String> = entry.values.iter().map(i64::to_string).collect();
            return format!("{name} {}\nOK\n", fields.join(" "));
        }
        if entry.read_only {
            return "FAIL: command not supported\n".to_string();
        }
        if entry.chained && args.len() == entry.values.len() + 1 && args.last() == Some(&1) {
            args.pop();
        }
        if args.len() != entry.values.len() {
            return "FAIL: wrong number of parameters\n".to_string();
        }
        let in_range = args
            .iter()
            .zip(&entry.ranges)
            .all(|(v, (lo, hi))| (*lo..=*hi).contains(v));
        if !in_range {
            return "FAIL: out of range\n".to_string();
        }
        entry.values = args;
        "OK\n".to_string()
    }
}
