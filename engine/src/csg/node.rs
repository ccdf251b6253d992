//! BSP tree nodes.
//!
//! Each node holds the polygons coplanar with its splitting plane and
//! two child subtrees for the front and back half-spaces. `clip_to`
//! removes the parts of this tree's polygons inside another tree, which
//! is the whole trick behind the boolean operations.

use super::plane::Plane;
use super::polygon::Polygon;

#[derive(Debug, Default)]
pub struct Node {
    plane: Option<Plane>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
    polygons: Vec<Polygon>,
}

impl Node {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Node::default();
        node.build(polygons);
        node
    }

    /// Convert solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        for p in &mut self.polygons {
            p.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        if let Some(front) = &mut self.front {
            front.invert();
        }
        if let Some(back) = &mut self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Remove from `polygons` everything inside this BSP tree.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return polygons;
        };

        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in &polygons {
            plane.split_polygon(
                polygon,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
        }
        // Coplanar polygons ride with the half-space their normal
        // agrees with.
        front.append(&mut coplanar_front);
        back.append(&mut coplanar_back);

        let mut front = match &self.front {
            Some(node) => node.clip_polygons(front),
            None => front,
        };
        let back = match &self.back {
            Some(node) => node.clip_polygons(back),
            // No back subtree: that half-space is solid, drop the polygons.
            None => Vec::new(),
        };

        front.extend(back);
        front
    }

    /// Remove everything in this tree that is inside `bsp`.
    pub fn clip_to(&mut self, bsp: &Node) {
        self.polygons = bsp.clip_polygons(std::mem::take(&mut self.polygons));
        if let Some(front) = &mut self.front {
            front.clip_to(bsp);
        }
        if let Some(back) = &mut self.back {
            back.clip_to(bsp);
        }
    }

    /// Collect every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = self.polygons.clone();
        if let Some(front) = &self.front {
            out.extend(front.all_polygons());
        }
        if let Some(back) = &self.back {
            out.extend(back.all_polygons());
        }
        out
    }

    /// Insert polygons into the tree, splitting as needed.
    ///
    /// The first polygon's plane seeds an empty node; no heuristics are
    /// used to pick better splitters.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        let plane = match self.plane {
            Some(p) => p,
            None => {
                let p = polygons[0].plane;
                self.plane = Some(p);
                p
            }
        };

        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in &polygons {
            plane.split_polygon(
                polygon,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
        }
        // Both coplanar orientations live at this node.
        self.polygons.append(&mut coplanar_front);
        self.polygons.append(&mut coplanar_back);

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(Node::default()))
                .build(front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(Node::default()))
                .build(back);
        }
    }
}
