// src/recording.rs
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use log::warn;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use crate::signal::{ChannelSeries, MyoError};
/// Field separator shared by the loader and [`crate::synth`].
const DELIMITER: u8 = b'\t';
/// Writer producing files [`Recording::parse`] accepts.
pub(crate) fn table_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().delimiter(DELIMITER).from_writer(out)
}
fn table_error(err: csv::Error) -> MyoError {
    if let csv::ErrorKind::UnequalLengths {
        pos: Some(pos),
        expected_len,
        len,
    } = err.kind()
    {
        return MyoError::Parse {
            line: pos.line() as usize,
            message: format!("expected {expected_len} columns, found {len}"),
        };
    }
    MyoError::Csv(err)
}
/// Tab-delimited recording: one header line, then one row per sample.
#[derive(Clone, Debug)]
pub struct Recording {
    header: Vec<String>,
    table: Array2<f64>, // samples x columns
}
impl Recording {
    pub fn parse<R: Read>(reader: R) -> Result<Self, MyoError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let header: Vec<String> = reader
            .headers()
            .map_err(table_error)?
            .iter()
            .map(str::to_owned)
            .collect();
        let mut rows = 0usize;
        let mut flat = Vec::new();
        for record in reader.records() {
            let record = record.map_err(table_error)?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            for cell in record.iter() {
                let value: f64 = cell.parse().map_err(|_| MyoError::Parse {
                    line,
                    message: format!("not a number: {cell:?}"),
                })?;
                flat.push(value);
            }
            rows += 1;
        }
        let table = Array2::from_shape_vec((rows, header.len()), flat)?;
        Ok(Self { header, table })
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MyoError> {
        Self::parse(File::open(path)?)
    }
    pub fn header(&self) -> &[String] {
        &self.header
    }
    pub fn rows(&self) -> usize {
        self.table.nrows()
    }
    pub fn columns(&self) -> usize {
        self.table.ncols()
    }
    pub fn table(&self) -> &Array2<f64> {
        &self.table
    }
    /// The requested columns that exist, in request order.
    pub fn select(&self, columns: &[usize]) -> Array2<f64> {
        let present: Vec<usize> = columns
            .iter()
            .copied()
            .filter(|&c| c < self.columns())
            .collect();
        self.table.select(Axis(1), &present)
    }
}
/// Which columns of the EMG and motion files carry signal channels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub emg_columns: Vec<usize>,
    pub motion_columns: Vec<usize>,
}
impl ColumnLayout {
    /// Laboratory export: four EMG leads, two blocks of marker trajectories.
    pub fn lab() -> Self {
        Self {
            emg_columns: vec![1, 4, 5, 8],
            motion_columns: (19..28).chain(46..56).collect(),
        }
    }
    /// Files written by [`crate::synth`].
    pub fn synthetic() -> Self {
        Self {
            emg_columns: (1..=4).collect(),
            motion_columns: (1..=6).collect(),
        }
    }
}
impl Default for ColumnLayout {
    fn default() -> Self {
        Self::lab()
    }
}
/// EMG and motion channel tables of one session.
#[derive(Clone, Debug)]
pub struct SessionRecording {
    emg: Array2<f64>,
    motion: Array2<f64>,
}
impl SessionRecording {
    pub fn new(emg: &Recording, motion: &Recording, layout: &ColumnLayout) -> Result<Self, MyoError> {
        let emg_table = emg.select(&layout.emg_columns);
        if emg_table.ncols() == 0 {
            return Err(MyoError::MissingColumns {
                expected: layout.emg_columns.clone(),
                actual: emg.columns(),
            });
        }
        Ok(Self {
            emg: emg_table,
            motion: motion.select(&layout.motion_columns),
        })
    }
    pub fn emg_channels(&self) -> usize {
        self.emg.ncols()
    }
    pub fn motion_channels(&self) -> usize {
        self.motion.ncols()
    }
    pub fn samples(&self) -> usize {
        self.emg.nrows()
    }
    /// EMG channel `channel` with its same-index motion channel. A motion
    /// table too narrow for `channel` is replaced by zeros of the EMG length.
    pub fn channel_pair(
        &self,
        channel: usize,
        emg_rate_hz: f64,
        motion_rate_hz: f64,
    ) -> Result<(ChannelSeries, ChannelSeries), MyoError> {
        if channel >= self.emg_channels() {
            return Err(MyoError::NoSuchChannel {
                channel,
                available: self.emg_channels(),
            });
        }
        let emg = ChannelSeries::new(emg_rate_hz, self.emg.column(channel).to_vec())?;
        let motion = if channel < self.motion_channels() {
            ChannelSeries::new(motion_rate_hz, self.motion.column(channel).to_vec())?
        } else {
            warn!(
                "motion data has {} channels, substituting zeros for channel {}",
                self.motion_channels(),
                channel
            );
            ChannelSeries::zeros(motion_rate_hz, emg.len())?
        };
        Ok((emg, motion))
    }
    /// Every EMG channel paired with its motion channel.
    pub fn all_pairs(
        &self,
        emg_rate_hz: f64,
        motion_rate_hz: f64,
    ) -> Result<Vec<(ChannelSeries, ChannelSeries)>, MyoError> {
        (0..self.emg_channels())
            .map(|ch| self.channel_pair(ch, emg_rate_hz, motion_rate_hz))
            .collect()
    }
}
#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use super::*;
    const EMG: &str = "Time\tL_BF\tL_VL\n0.0\t0.1\t-0.2\n0.5\t0.3\t0.4\n\n1.0\t-0.5\t0.6\n";
    const TRAJ: &str = "Time\tRASISX\n0.0\t600.0\n0.5\t601.5\n1.0\t603.0\n";
    #[test]
    fn parses_header_and_rows() {
        let rec = Recording::parse(Cursor::new(EMG)).unwrap();
        assert_eq!(rec.header(), &["Time", "L_BF", "L_VL"]);
        assert_eq!(rec.rows(), 3);
        assert_eq!(rec.columns(), 3);
        assert_eq!(rec.table()[[2, 1]], -0.5);
    }
    #[test]
    fn reports_the_offending_line() {
        let err = Recording::parse(Cursor::new("T\tA\n0\t1\n1\tx\n")).unwrap_err();
        assert!(matches!(err, MyoError::Parse { line: 3, .. }));
        let err = Recording::parse(Cursor::new("T\tA\n0\t1\n1\t2\t3\n")).unwrap_err();
        assert!(matches!(err, MyoError::Parse { line: 3, .. }));
    }
    #[test]
    fn undecodable_bytes_surface_as_table_errors() {
        let bytes: &[u8] = b"T\tA\n0\t\xff\xfe\n";
        let err = Recording::parse(bytes).unwrap_err();
        assert!(matches!(err, MyoError::Csv(_)));
    }
    #[test]
    fn writer_output_reads_back() {
        let mut text = Vec::new();
        let mut writer = table_writer(&mut text);
        writer.write_record(["Time", "L_BF"]).unwrap();
        writer.write_record(["0.5", "-0.25"]).unwrap();
        drop(writer);
        assert_eq!(text, b"Time\tL_BF\n0.5\t-0.25\n");
        let rec = Recording::parse(text.as_slice()).unwrap();
        assert_eq!(rec.table()[[0, 1]], -0.25);
    }
    #[test]
    fn header_only_file_is_empty() {
        let rec = Recording::parse(Cursor::new("Time\tA\tB\n")).unwrap();
        assert_eq!(rec.rows(), 0);
        assert_eq!(rec.columns(), 3);
    }
    #[test]
    fn select_skips_missing_columns() {
        let rec = Recording::parse(Cursor::new(EMG)).unwrap();
        let picked = rec.select(&[2, 7, 1]);
        assert_eq!(picked.ncols(), 2);
        assert_eq!(picked[[0, 0]], -0.2);
        assert_eq!(picked[[0, 1]], 0.1);
    }
    #[test]
    fn lab_layout_matches_export_columns() {
        let layout = ColumnLayout::lab();
        assert_eq!(layout.emg_columns, vec![1, 4, 5, 8]);
        assert_eq!(layout.motion_columns.len(), 19);
        assert_eq!(layout.motion_columns[0], 19);
        assert_eq!(*layout.motion_columns.last().unwrap(), 55);
    }
    #[test]
    fn narrow_motion_table_is_zero_filled() {
        let emg = Recording::parse(Cursor::new(EMG)).unwrap();
        let traj = Recording::parse(Cursor::new(TRAJ)).unwrap();
        let layout = ColumnLayout {
            emg_columns: vec![1, 2],
            motion_columns: vec![1],
        };
        let session = SessionRecording::new(&emg, &traj, &layout).unwrap();
        let (emg0, motion0) = session.channel_pair(0, 2000.0, 200.0).unwrap();
        assert_eq!(emg0.samples(), &[0.1, 0.3, -0.5]);
        assert_eq!(motion0.samples(), &[600.0, 601.5, 603.0]);
        let (_, motion1) = session.channel_pair(1, 2000.0, 200.0).unwrap();
        assert_eq!(motion1.samples(), &[0.0, 0.0, 0.0]);
        assert_eq!(motion1.sample_rate_hz(), 200.0);
        assert!(matches!(
            session.channel_pair(2, 2000.0, 200.0),
            Err(MyoError::NoSuchChannel { channel: 2, available: 2 })
        ));
        assert_eq!(session.all_pairs(2000.0, 200.0).unwrap().len(), 2);
    }
    #[test]
    fn emg_layout_must_hit_a_column() {
        let emg = Recording::parse(Cursor::new(EMG)).unwrap();
        let traj = Recording::parse(Cursor::new(TRAJ)).unwrap();
        let layout = ColumnLayout {
            emg_columns: vec![4, 5, 8],
            motion_columns: vec![1],
        };
        let err = SessionRecording::new(&emg, &traj, &layout).unwrap_err();
        assert!(matches!(err, MyoError::MissingColumns { actual: 3, .. }));
    }
}
