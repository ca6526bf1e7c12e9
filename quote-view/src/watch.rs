use std::time::Duration;

use crossbeam_channel::{Receiver, select, tick};
use log::{debug, info};

/// Вызывает `cycle` сразу и затем каждые `interval`, пока не придёт сигнал в `shutdown`.
///
/// Возвращает число выполненных циклов.
pub(crate) fn run_watch<F>(interval: Duration, shutdown: Receiver<()>, mut cycle: F) -> usize
where
    F: FnMut(),
{
    let ticker = tick(interval);
    let mut cycles = 0usize;

    cycle();
    cycles += 1;

    loop {
        select! {
            recv(shutdown) -> _ => {
                // и сигнал, и закрытый канал означают остановку
                info!("watch stopped after {cycles} cycles");
                break;
            }
            recv(ticker) -> _ => {
                debug!("watch tick #{cycles}");
                cycle();
                cycles += 1;
            }
        }
    }

    cycles
}
