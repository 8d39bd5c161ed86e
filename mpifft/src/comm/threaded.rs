//! Group of threads within one process
use std::{
    fmt,
    sync::{
        mpsc::{channel, Receiver, Sender},
        Arc, Mutex,
    },
    thread,
};

use itertools::Itertools;

use crate::{errors::MpiFftError, traits::communicator::Communicator};

/// Point to point channels between every ordered pair of threads of a world.
struct Mailboxes {
    /// `senders[src][dst]`
    senders: Vec<Vec<Sender<Vec<u8>>>>,

    /// `receivers[dst][src]`
    receivers: Vec<Vec<Mutex<Receiver<Vec<u8>>>>>,
}

/// Group of threads of a single process, each thread holding its own handle.
///
/// Messages between a pair of threads are delivered in order, so collectives behave as their MPI
/// counterparts as long as every member issues them in the same order. Sub-groups created by
/// [`Communicator::split`] share the channels of their world.
#[derive(Clone)]
pub struct ThreadComm {
    mailboxes: Arc<Mailboxes>,

    /// World index of each member of this group, in rank order
    members: Arc<[usize]>,

    /// Rank of the handle within this group
    rank: usize,
}

impl ThreadComm {
    /// Create the handles of a world of `size` threads, handle `i` has rank `i`.
    pub fn world(size: usize) -> Vec<ThreadComm> {
        let mut senders = (0..size).map(|_| Vec::with_capacity(size)).collect_vec();
        let mut receivers = (0..size)
            .map(|_| Vec::with_capacity(size))
            .collect_vec();

        for dst in 0..size {
            for sender in senders.iter_mut() {
                let (tx, rx) = channel();
                sender.push(tx);
                receivers[dst].push(Mutex::new(rx));
            }
        }

        let mailboxes = Arc::new(Mailboxes { senders, receivers });
        let members: Arc<[usize]> = (0..size).collect_vec().into();

        (0..size)
            .map(|rank| ThreadComm {
                mailboxes: mailboxes.clone(),
                members: members.clone(),
                rank,
            })
            .collect()
    }

    /// Run `f` on a world of `size` scoped threads, returning the results in rank order. A panic on
    /// any thread is propagated to the caller.
    pub fn run<R, F>(size: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(ThreadComm) -> R + Sync,
    {
        let f = &f;
        thread::scope(|scope| {
            let handles = ThreadComm::world(size)
                .into_iter()
                .map(|comm| scope.spawn(move || f(comm)))
                .collect_vec();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|err| std::panic::resume_unwind(err))
                })
                .collect()
        })
    }

    fn world_rank(&self) -> usize {
        self.members[self.rank]
    }

    fn send(&self, dst: usize, message: Vec<u8>) -> Result<(), MpiFftError> {
        self.mailboxes.senders[self.world_rank()][self.members[dst]]
            .send(message)
            .map_err(|_| {
                MpiFftError::Communication(format!("rank {dst} has left the group"))
            })
    }

    fn recv(&self, src: usize) -> Result<Vec<u8>, MpiFftError> {
        let receiver = self.mailboxes.receivers[self.world_rank()][self.members[src]]
            .lock()
            .map_err(|_| MpiFftError::Communication("poisoned channel".to_string()))?;
        receiver
            .recv()
            .map_err(|_| MpiFftError::Communication(format!("rank {src} has left the group")))
    }
}

impl fmt::Debug for ThreadComm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadComm")
            .field("rank", &self.rank)
            .field("members", &self.members)
            .finish()
    }
}

impl Communicator for ThreadComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.members.len()
    }

    fn all_to_all_bytes(&self, send: &[u8], recv: &mut [u8]) -> Result<(), MpiFftError> {
        let size = self.size();
        if send.len() != recv.len() || send.len() % size != 0 {
            return Err(MpiFftError::Communication(format!(
                "all-to-all buffers of {} and {} bytes cannot be split in {size} equal blocks",
                send.len(),
                recv.len()
            )));
        }
        let block = send.len() / size;
        let counts = vec![block; size];
        let displs = (0..size).map(|i| i * block).collect_vec();
        self.all_to_all_varcount_bytes(send, &counts, &displs, recv, &counts, &displs)
    }

    fn all_to_all_varcount_bytes(
        &self,
        send: &[u8],
        send_counts: &[usize],
        send_displs: &[usize],
        recv: &mut [u8],
        recv_counts: &[usize],
        recv_displs: &[usize],
    ) -> Result<(), MpiFftError> {
        let size = self.size();

        // Channels are unbounded, so every send completes before any receive
        for dst in 0..size {
            let start = send_displs[dst];
            self.send(dst, send[start..start + send_counts[dst]].to_vec())?;
        }

        for src in 0..size {
            let message = self.recv(src)?;
            if message.len() != recv_counts[src] {
                return Err(MpiFftError::Communication(format!(
                    "received {} bytes from rank {src} but expected {}",
                    message.len(),
                    recv_counts[src]
                )));
            }
            let start = recv_displs[src];
            recv[start..start + message.len()].copy_from_slice(&message);
        }

        Ok(())
    }

    fn split(&self, color: usize, key: usize) -> Result<Self, MpiFftError> {
        let size = self.size();

        // All-gather of every member's colour and key
        let entry = [color as u64, key as u64];
        let send = (0..size).flat_map(|_| entry).collect_vec();
        let mut recv = vec![0u64; 2 * size];
        self.all_to_all(&send, &mut recv)?;

        let mut group = recv
            .chunks_exact(2)
            .enumerate()
            .filter(|(_, entry)| entry[0] == color as u64)
            .map(|(rank, entry)| (entry[1], rank))
            .collect_vec();
        group.sort_unstable();

        let rank = group
            .iter()
            .position(|&(_, r)| r == self.rank)
            .ok_or_else(|| MpiFftError::Communication("rank missing from its own colour".to_string()))?;

        let members: Arc<[usize]> = group
            .iter()
            .map(|&(_, r)| self.members[r])
            .collect_vec()
            .into();

        Ok(ThreadComm {
            mailboxes: self.mailboxes.clone(),
            members,
            rank,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::{comm::ThreadComm, traits::communicator::Communicator};

    #[test]
    fn test_all_to_all() {
        let size = 4;
        let results = ThreadComm::run(size, |comm| {
            let rank = comm.rank();
            // Block j holds 10 * rank + j
            let send = (0..size).map(|j| (10 * rank + j) as i32).collect::<Vec<_>>();
            let mut recv = vec![0i32; size];
            comm.all_to_all(&send, &mut recv).unwrap();
            recv
        });

        for (rank, recv) in results.iter().enumerate() {
            let expected = (0..size).map(|j| (10 * j + rank) as i32).collect::<Vec<_>>();
            assert_eq!(recv, &expected);
        }
    }

    #[test]
    fn test_all_to_all_varcount() {
        let size = 3;
        let results = ThreadComm::run(size, |comm| {
            let rank = comm.rank();
            // Rank r sends j + 1 copies of r to rank j
            let send_counts = (0..size).map(|j| j + 1).collect::<Vec<_>>();
            let send_displs = (0..size).map(|j| j * (j + 1) / 2).collect::<Vec<_>>();
            let send = vec![rank as f32; send_counts.iter().sum()];

            let recv_counts = vec![rank + 1; size];
            let recv_displs = (0..size).map(|j| j * (rank + 1)).collect::<Vec<_>>();
            let mut recv = vec![-1f32; size * (rank + 1)];

            comm.all_to_all_varcount(
                &send,
                &send_counts,
                &send_displs,
                &mut recv,
                &recv_counts,
                &recv_displs,
            )
            .unwrap();
            recv
        });

        assert_eq!(results[0], vec![0.0, 1.0, 2.0]);
        assert_eq!(results[2], vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_split() {
        let results = ThreadComm::run(6, |comm| {
            let rank = comm.rank();
            // Two rows of three, ordered in reverse within each row
            let row = comm.split(rank / 3, 2 - rank % 3).unwrap();

            // Exchange world ranks within the row
            let send = vec![rank as u32; row.size()];
            let mut recv = vec![0u32; row.size()];
            row.all_to_all(&send, &mut recv).unwrap();
            (row.rank(), row.size(), recv)
        });

        assert_eq!(results[0], (2, 3, vec![2, 1, 0]));
        assert_eq!(results[4], (1, 3, vec![5, 4, 3]));
    }
}
