use crate::handle::Handle;
use prelude_plus::*;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Attachment {
  Texture { texture: Handle, level: u32, layer: u32 },
  Renderbuffer(Handle),
}

/// Attachments of framebuffer objects and the draw/read bindings.
#[derive(Debug, Default)]
pub struct Framebuffers {
  attachments: HashMap<Handle, BTreeMap<u32, Attachment>>,
  draw: Option<Handle>,
  read: Option<Handle>,
}

impl Framebuffers {
  #[inline(always)]
  pub fn draw_binding(&self) -> Option<Handle> { self.draw }
  #[inline(always)]
  pub fn read_binding(&self) -> Option<Handle> { self.read }

  fn binding(&self, target: u32) -> Option<Handle> {
    match target {
      gl::READ_FRAMEBUFFER => self.read,
      _ => self.draw,
    }
  }

  /// Returns the previous binding of `target`, for `FRAMEBUFFER` that's the
  /// draw binding.
  pub fn bind(&mut self, target: u32, framebuffer: Option<Handle>) -> Option<Handle> {
    match target {
      gl::FRAMEBUFFER => {
        self.read = framebuffer;
        mem::replace(&mut self.draw, framebuffer)
      }
      gl::READ_FRAMEBUFFER => mem::replace(&mut self.read, framebuffer),
      _ => mem::replace(&mut self.draw, framebuffer),
    }
  }

  /// Attaches to (or with `None` detaches from) the framebuffer bound to
  /// `target`. `DEPTH_STENCIL_ATTACHMENT` stands for both the depth and the
  /// stencil attachment.
  pub fn attach(&mut self, target: u32, point: u32, attachment: Option<Attachment>) {
    let framebuffer = match self.binding(target) {
      Some(framebuffer) => framebuffer,
      None => return,
    };
    let points: &[u32] = if point == gl::DEPTH_STENCIL_ATTACHMENT {
      &[gl::DEPTH_ATTACHMENT, gl::STENCIL_ATTACHMENT]
    } else {
      &[point]
    };
    let attachments = self.attachments.entry(framebuffer).or_insert_with(BTreeMap::new);
    for &point in points {
      match attachment {
        Some(attachment) => attachments.insert(point, attachment),
        None => attachments.remove(&point),
      };
    }
  }

  pub fn attachment(&self, framebuffer: Handle, point: u32) -> Option<&Attachment> {
    self.attachments.get(&framebuffer).and_then(|attachments| attachments.get(&point))
  }

  /// The attachment points `texture` is attached to on `framebuffer`.
  pub fn points_of_texture(&self, framebuffer: Handle, texture: Handle) -> Vec<u32> {
    self.attachments.get(&framebuffer).map_or_else(Vec::new, |attachments| {
      attachments
        .iter()
        .filter(|(_, attachment)| {
          matches!(attachment, Attachment::Texture { texture: t, .. } if *t == texture)
        })
        .map(|(&point, _)| point)
        .collect()
    })
  }

  pub fn delete(&mut self, framebuffer: Handle) {
    self.attachments.remove(&framebuffer);
    if self.draw == Some(framebuffer) {
      self.draw = None;
    }
    if self.read == Some(framebuffer) {
      self.read = None;
    }
  }

  /// Deleting an attached image detaches it from the bound framebuffers.
  pub fn detach_image(&mut self, image: Handle) {
    for framebuffer in [self.draw, self.read].iter().flatten() {
      if let Some(attachments) = self.attachments.get_mut(framebuffer) {
        attachments.retain(|_, attachment| match *attachment {
          Attachment::Texture { texture, .. } => texture != image,
          Attachment::Renderbuffer(renderbuffer) => renderbuffer != image,
        });
      }
    }
  }

  pub fn clear(&mut self) {
    self.attachments.clear();
    self.draw = None;
    self.read = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::handle::ObjectKind;

  #[test]
  fn depth_stencil_counts_as_both() {
    let mut framebuffers = Framebuffers::default();
    let fb = Handle::new(ObjectKind::Framebuffer, 1);
    let texture = Handle::new(ObjectKind::Texture, 1);
    framebuffers.bind(gl::FRAMEBUFFER, Some(fb));
    framebuffers.attach(
      gl::FRAMEBUFFER,
      gl::DEPTH_STENCIL_ATTACHMENT,
      Some(Attachment::Texture { texture, level: 0, layer: 0 }),
    );
    assert_eq!(
      framebuffers.points_of_texture(fb, texture),
      [gl::DEPTH_ATTACHMENT, gl::STENCIL_ATTACHMENT]
    );

    framebuffers.detach_image(texture);
    assert!(framebuffers.points_of_texture(fb, texture).is_empty());
  }

  #[test]
  fn framebuffer_binds_draw_and_read() {
    let mut framebuffers = Framebuffers::default();
    let a = Handle::new(ObjectKind::Framebuffer, 1);
    let b = Handle::new(ObjectKind::Framebuffer, 2);
    framebuffers.bind(gl::FRAMEBUFFER, Some(a));
    assert_eq!(framebuffers.bind(gl::DRAW_FRAMEBUFFER, Some(b)), Some(a));
    assert_eq!((framebuffers.draw_binding(), framebuffers.read_binding()), (Some(b), Some(a)));
    framebuffers.delete(a);
    assert_eq!(framebuffers.read_binding(), None);
  }
}
