//! Execution of forward and inverse transforms
use num::Zero;
use num_complex::Complex;
use tracing::instrument;

use crate::{
    dealias::{apply_mask, pad_axis, truncate_axis},
    decomposition::types::{Plan, Step},
    errors::MpiFftError,
    helpers::n_elements,
    pipeline::types::{DistributedFft, C2C, R2C},
    traits::{
        communicator::Communicator, fft::LocalFft, scalar::RealScalar,
        transform::DistributedTransform, transpose::Transpose,
    },
    types::{Dealias, Sign},
};

impl<T, C> DistributedFft<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    /// Plan of the physical layout used with a dealias mode.
    pub fn active_plan(&self, dealias: Dealias) -> Result<&Plan, MpiFftError> {
        if dealias.is_padded() {
            self.padded_plan.as_ref().map_err(|err| err.clone())
        } else {
            Ok(&self.plan)
        }
    }

    /// Apply forward steps `start..` of `plan` to `work`, held in layout `start`, and write the local
    /// spectral block into `output`.
    fn forward_steps(
        &self,
        plan: &Plan,
        start: usize,
        mut work: Vec<Complex<T>>,
        output: &mut [Complex<T>],
        dealias: Dealias,
    ) -> Result<(), MpiFftError> {
        for index in start..plan.steps.len() {
            let before = &plan.layouts[index];
            let after = &plan.layouts[index + 1];

            match plan.steps[index] {
                Step::Complex { axis } => {
                    let shape = before.local_shape();
                    self.kernel.c2c(&mut work, &shape, axis, Sign::Forward)?;
                    if before.extents[axis] != after.extents[axis] {
                        let mut truncated = vec![Complex::zero(); after.local_len()];
                        truncate_axis(
                            &work,
                            &shape,
                            axis,
                            after.extents[axis],
                            false,
                            &mut truncated,
                        );
                        work = truncated;
                    }
                }

                Step::Transpose { group, .. } => {
                    let redistribution = plan.redistribution(index).ok_or_else(|| {
                        MpiFftError::Configuration(format!("step {index} is not a transpose"))
                    })?;
                    let mut received = vec![Complex::zero(); after.local_len()];
                    self.exchange
                        .transpose(&self.groups[group], &redistribution, &work, &mut received)?;
                    work = received;
                }

                Step::Real { axis } => {
                    return Err(MpiFftError::Configuration(format!(
                        "real transform along axis {axis} must be the first step"
                    )))
                }
            }
        }

        output.copy_from_slice(&work);
        self.finish_forward(plan, output, dealias);
        Ok(())
    }

    /// Mask and rescale the local spectral block after a forward transform.
    fn finish_forward(&self, plan: &Plan, output: &mut [Complex<T>], dealias: Dealias) {
        let spectral = plan.spectral();

        if dealias != Dealias::None {
            let offset = spectral.local.iter().map(|r| r.start).collect::<Vec<_>>();
            apply_mask(
                output,
                &spectral.local_shape(),
                &offset,
                &self.shape,
                spectral.reduced,
            );
        }

        // Coefficients computed at padded resolution are rescaled to the unpadded resolution
        let physical = n_elements(&plan.physical().extents);
        let unpadded = n_elements(&self.shape);
        if physical != unpadded {
            let scale = T::ratio(unpadded, physical);
            output.iter_mut().for_each(|c| *c = c.scale(scale));
        }
    }

    /// Apply the inverse of forward steps `stop..` of `plan` to the local spectral block `input`, returning
    /// the local block in layout `stop`.
    fn inverse_steps(
        &self,
        plan: &Plan,
        stop: usize,
        input: &[Complex<T>],
        dealias: Dealias,
    ) -> Result<Vec<Complex<T>>, MpiFftError> {
        let mut work = input.to_vec();

        if dealias == Dealias::TwoThirds {
            let spectral = plan.spectral();
            let offset = spectral.local.iter().map(|r| r.start).collect::<Vec<_>>();
            apply_mask(
                &mut work,
                &spectral.local_shape(),
                &offset,
                &self.shape,
                spectral.reduced,
            );
        }

        for index in (stop..plan.steps.len()).rev() {
            let before = &plan.layouts[index];
            let after = &plan.layouts[index + 1];

            match plan.steps[index] {
                Step::Complex { axis } => {
                    if before.extents[axis] != after.extents[axis] {
                        let mut padded = vec![Complex::zero(); before.local_len()];
                        pad_axis(
                            &work,
                            &after.local_shape(),
                            axis,
                            before.extents[axis],
                            false,
                            &mut padded,
                        );
                        work = padded;
                    }
                    self.kernel
                        .c2c(&mut work, &before.local_shape(), axis, Sign::Backward)?;
                }

                Step::Transpose { group, .. } => {
                    let redistribution = plan
                        .redistribution(index)
                        .ok_or_else(|| {
                            MpiFftError::Configuration(format!("step {index} is not a transpose"))
                        })?
                        .reversed();
                    let mut received = vec![Complex::zero(); before.local_len()];
                    self.exchange
                        .transpose(&self.groups[group], &redistribution, &work, &mut received)?;
                    work = received;
                }

                Step::Real { axis } => {
                    return Err(MpiFftError::Configuration(format!(
                        "real transform along axis {axis} must be the first step"
                    )))
                }
            }
        }

        Ok(work)
    }

    /// Normalisation of the inverse transform.
    fn inverse_scale(&self) -> T {
        T::ratio(1, n_elements(&self.shape))
    }

    /// Check caller buffers against the physical layout of `plan` and the spectral layout.
    fn check_buffers(
        &self,
        plan: &Plan,
        physical: usize,
        spectral: usize,
    ) -> Result<(), MpiFftError> {
        MpiFftError::check_len(&plan.physical().local_shape(), physical)?;
        MpiFftError::check_len(&self.plan.spectral().local_shape(), spectral)
    }
}

impl<T, C> DistributedTransform for R2C<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    type Real = T;
    type Physical = T;

    #[instrument(level = "debug", skip_all, fields(dealias = ?dealias))]
    fn forward(
        &self,
        input: &[T],
        output: &mut [Complex<T>],
        dealias: Dealias,
    ) -> Result<(), MpiFftError> {
        let plan = self.active_plan(dealias)?;
        self.check_buffers(plan, input.len(), output.len())?;

        let Step::Real { axis } = plan.steps[0] else {
            return Err(MpiFftError::Configuration(
                "real-to-complex plan must begin with a real transform".to_string(),
            ));
        };
        let before = &plan.layouts[0];
        let after = &plan.layouts[1];
        let shape = before.local_shape();

        let mut work = vec![Complex::zero(); n_elements(&shape) / shape[axis] * (shape[axis] / 2 + 1)];
        self.kernel.r2c(input, &mut work, &shape)?;

        // Truncate the reduced axis from padded resolution
        if shape[axis] != self.shape[axis] {
            let mut reduced_shape = shape.clone();
            reduced_shape[axis] = shape[axis] / 2 + 1;
            let mut truncated = vec![Complex::zero(); after.local_len()];
            truncate_axis(
                &work,
                &reduced_shape,
                axis,
                after.extents[axis],
                true,
                &mut truncated,
            );
            work = truncated;
        }

        self.forward_steps(plan, 1, work, output, dealias)
    }

    #[instrument(level = "debug", skip_all, fields(dealias = ?dealias))]
    fn inverse(
        &self,
        input: &[Complex<T>],
        output: &mut [T],
        dealias: Dealias,
    ) -> Result<(), MpiFftError> {
        let plan = self.active_plan(dealias)?;
        self.check_buffers(plan, output.len(), input.len())?;

        let Step::Real { axis } = plan.steps[0] else {
            return Err(MpiFftError::Configuration(
                "real-to-complex plan must begin with a real transform".to_string(),
            ));
        };
        let mut work = self.inverse_steps(plan, 1, input, dealias)?;

        let shape = plan.layouts[0].local_shape();
        let reduced = shape[axis] / 2 + 1;

        // Zero pad the reduced axis to padded resolution
        let current = plan.layouts[1].local_shape();
        if current[axis] != reduced {
            let mut padded_shape = current.clone();
            padded_shape[axis] = reduced;
            let mut padded = vec![Complex::zero(); n_elements(&padded_shape)];
            pad_axis(&work, &current, axis, reduced, true, &mut padded);
            work = padded;
        }

        self.kernel.c2r(&work, output, &shape)?;

        let scale = self.inverse_scale();
        output.iter_mut().for_each(|x| *x = *x * scale);
        Ok(())
    }
}

impl<T, C> DistributedTransform for C2C<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    type Real = T;
    type Physical = Complex<T>;

    #[instrument(level = "debug", skip_all, fields(dealias = ?dealias))]
    fn forward(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
        dealias: Dealias,
    ) -> Result<(), MpiFftError> {
        let plan = self.active_plan(dealias)?;
        self.check_buffers(plan, input.len(), output.len())?;
        self.forward_steps(plan, 0, input.to_vec(), output, dealias)
    }

    #[instrument(level = "debug", skip_all, fields(dealias = ?dealias))]
    fn inverse(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
        dealias: Dealias,
    ) -> Result<(), MpiFftError> {
        let plan = self.active_plan(dealias)?;
        self.check_buffers(plan, output.len(), input.len())?;

        let work = self.inverse_steps(plan, 0, input, dealias)?;
        let scale = self.inverse_scale();
        for (o, w) in output.iter_mut().zip(work.iter()) {
            *o = w.scale(scale);
        }
        Ok(())
    }
}
